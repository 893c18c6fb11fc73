//! A stealth-game simulation built in Rust
//!
//! This crate provides:
//! - Guards that patrol, spot, chase and give up on targets
//! - Prisoners that flee once the key is taken
//! - Entity Component System (ECS) architecture on hecs
//! - Sphere contacts, level files and an explicit fixed-step tick

pub mod ai;
pub mod assets;
pub mod core;
pub mod ecs;
pub mod gameplay;
pub mod physics;
pub mod visual;

// Re-exports for convenience
pub use glam;
pub use hecs;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{NavAgent, Navigator, VisionCone};
    pub use crate::core::{
        DestroyCause, EventQueue, GameEvent, Level, SceneError, Simulation, SimulationConfig,
        TickStats, Time,
    };
    pub use crate::ecs::{Barrier, ExitZone, Name, Player, Transform, World};
    pub use crate::gameplay::{
        GameFlow, GameSession, Guard, GuardConfig, GuardMode, KeyPickup, Prisoner, UiFlow,
    };
    pub use crate::physics::{Collider, ContactTracker};
    pub use glam::{Quat, Vec3};
}
