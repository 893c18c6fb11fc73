//! AI and navigation module
//!
//! Provides vision cones, straight-line navigation agents, steering helpers,
//! and a generic finite state machine.

mod fsm;
mod navigation;
mod perception;
mod steering;

pub use fsm::{State, StateMachine, Transition};
pub use navigation::{DEFAULT_ANGULAR_SPEED, DEFAULT_STOPPING_DISTANCE, NavAgent, Navigator};
pub use perception::{Sighting, VisionCone, detect_target};
pub use steering::{ease_towards, seek_step, turn_towards, yaw_towards};
