//! Core simulation module
//!
//! Contains the Simulation struct, its configuration, the clock, events and
//! level files

pub mod debug;
mod engine;
mod events;
mod scene;
mod time;

pub use debug::TickStats;
pub use engine::{Simulation, SimulationConfig};
pub use events::{DestroyCause, EventQueue, GameEvent};
pub use scene::{
    BarrierSpawn, ExitSpawn, GuardSpawn, KeySpawn, Level, PlayerSpawn, PrisonerSpawn, SceneError,
};
pub use time::Time;
