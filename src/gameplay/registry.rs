//! Capability queries over the world
//!
//! Gameplay asks for "the player", "pursuable prisoners", or "the exit"
//! instead of looking objects up by name.

use glam::Vec3;
use hecs::Entity;

use super::{Guard, KeyPickup, Prisoner};
use crate::ai::Sighting;
use crate::ecs::{Barrier, ExitZone, Player, Transform, World};

/// The player, if present.
#[must_use]
pub fn player(world: &World) -> Option<Sighting> {
    world
        .query::<(&Player, &Transform)>()
        .iter()
        .map(|(entity, (_, transform))| Sighting::new(entity, transform.position))
        .next()
}

/// Every live prisoner, in storage order.
#[must_use]
pub fn prisoners(world: &World) -> Vec<Sighting> {
    world
        .query::<(&Prisoner, &Transform)>()
        .iter()
        .map(|(entity, (_, transform))| Sighting::new(entity, transform.position))
        .collect()
}

/// Position of the level exit.
#[must_use]
pub fn exit(world: &World) -> Option<Vec3> {
    world
        .query::<(&ExitZone, &Transform)>()
        .iter()
        .map(|(_, (_, transform))| transform.position)
        .next()
}

/// What an entity is, as far as contact handling cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Player,
    Guard,
    Prisoner,
    Key,
    Exit,
    Barrier,
    Other,
}

/// Classify `entity` by the capability components it carries.
#[must_use]
pub fn role(world: &World, entity: Entity) -> Role {
    if world.has::<Player>(entity) {
        Role::Player
    } else if world.has::<Guard>(entity) {
        Role::Guard
    } else if world.has::<Prisoner>(entity) {
        Role::Prisoner
    } else if world.has::<KeyPickup>(entity) {
        Role::Key
    } else if world.has::<ExitZone>(entity) {
        Role::Exit
    } else if world.has::<Barrier>(entity) {
        Role::Barrier
    } else {
        Role::Other
    }
}
