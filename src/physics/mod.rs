//! Contact detection
//!
//! Sphere-overlap contacts standing in for a physics engine's collision and
//! trigger callbacks.

mod contacts;

pub use contacts::{Collider, Contact, ContactTracker, Contacts};
