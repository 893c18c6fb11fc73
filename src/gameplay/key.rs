//! The cell key: spins in place, and when the player touches it every
//! barrier is removed and the prisoners start their escape.

use glam::Vec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use super::GameSession;
use crate::ecs::{Barrier, Transform, World};

/// Tuning for the key pickup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Spin about the local X axis, degrees per second
    pub spin_x: f32,
    /// Spin about the local Y axis, degrees per second
    pub spin_y: f32,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            spin_x: 30.0,
            spin_y: 60.0,
        }
    }
}

/// Key component.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPickup {
    pub config: KeyConfig,
}

impl KeyPickup {
    #[must_use]
    pub fn new(config: KeyConfig) -> Self {
        Self { config }
    }

    /// Cosmetic rotation for one tick.
    pub fn spin(&self, transform: &mut Transform, dt: f32) {
        transform.rotate_euler(Vec3::new(
            (self.config.spin_x * dt).to_radians(),
            (self.config.spin_y * dt).to_radians(),
            0.0,
        ));
    }
}

/// Result of a successful pickup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollected {
    /// Barriers that were removed
    pub barriers: Vec<Entity>,
}

/// Pick up `key`: remove it and every barrier, and mark the key as collected
/// in the session.
///
/// Returns `None` if `key` is not a live key, which makes repeated contacts
/// harmless.
pub fn collect_key(
    world: &mut World,
    session: &mut GameSession,
    key: Entity,
) -> Option<KeyCollected> {
    if !world.has::<KeyPickup>(key) {
        log::debug!("ignoring pickup of {key:?}: not a live key");
        return None;
    }
    let _ = world.despawn(key);

    let barriers = world.entities_with::<Barrier>();
    for &barrier in &barriers {
        let _ = world.despawn(barrier);
    }

    session.collect_key();
    log::info!("key collected, {} barrier(s) removed", barriers.len());
    Some(KeyCollected { barriers })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> (World, Entity) {
        let mut world = World::new();
        let key = world.spawn((KeyPickup::default(), Transform::default()));
        world.spawn((Barrier, Transform::default()));
        world.spawn((Barrier, Transform::default()));
        (world, key)
    }

    #[test]
    fn test_pickup_removes_key_and_barriers() {
        let (mut world, key) = level();
        let mut session = GameSession::new();

        let collected = collect_key(&mut world, &mut session, key).unwrap();

        assert_eq!(collected.barriers.len(), 2);
        assert!(!world.contains(key));
        assert!(world.entities_with::<Barrier>().is_empty());
        assert!(session.key_collected());
    }

    #[test]
    fn test_pickup_is_idempotent() {
        let (mut world, key) = level();
        let mut session = GameSession::new();
        collect_key(&mut world, &mut session, key);
        let remaining = world.len();

        assert!(collect_key(&mut world, &mut session, key).is_none());
        assert_eq!(world.len(), remaining);
        assert!(session.key_collected());
    }

    #[test]
    fn test_non_key_entity_is_ignored() {
        let (mut world, _) = level();
        let mut session = GameSession::new();
        let bystander = world.spawn((Transform::default(),));

        assert!(collect_key(&mut world, &mut session, bystander).is_none());
        assert!(world.contains(bystander));
        assert!(!session.key_collected());
        assert_eq!(world.entities_with::<Barrier>().len(), 2);
    }

    #[test]
    fn test_spin_turns_in_place() {
        let key = KeyPickup::default();
        let mut transform = Transform::from_position(Vec3::new(1.0, 1.0, 1.0));

        key.spin(&mut transform, 0.5);

        assert_eq!(transform.position, Vec3::new(1.0, 1.0, 1.0));
        assert!(transform.rotation.angle_between(glam::Quat::IDENTITY) > 0.1);
    }
}
