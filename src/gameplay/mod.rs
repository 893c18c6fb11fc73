//! Stealth gameplay
//!
//! Guards, prisoners, the key, and the flow between levels. Everything here
//! is driven by [`systems::run_tick`].

mod flow;
mod guard;
mod key;
mod level;
mod player;
mod prisoner;
pub mod registry;
mod session;
pub mod systems;

pub use flow::{GameFlow, SceneRequest, UiFlow};
pub use guard::{Guard, GuardConfig, GuardMode, GuardShift, Outlook, PatrolRoute};
pub use key::{KeyCollected, KeyConfig, KeyPickup, collect_key};
pub use level::{SpawnedLevel, spawn_level};
pub use player::{PlayerScript, ScriptedWalker};
pub use prisoner::{Prisoner, PrisonerConfig};
pub use session::GameSession;
pub use systems::TickContext;
