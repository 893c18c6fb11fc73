//! Contact detection between sphere colliders
//!
//! No rigid-body response: overlaps are only reported. Each overlapping pair
//! produces a single enter event and must separate before it can fire again.

use hecs::Entity;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::ecs::{Transform, World};

/// Sphere collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Radius in world units
    pub radius: f32,
    /// Trigger volumes report overlaps but are not solid
    pub trigger: bool,
}

impl Collider {
    #[must_use]
    pub const fn solid(radius: f32) -> Self {
        Self {
            radius,
            trigger: false,
        }
    }

    #[must_use]
    pub const fn trigger(radius: f32) -> Self {
        Self {
            radius,
            trigger: true,
        }
    }
}

/// A newly started overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Two solid colliders touched.
    Collision { a: Entity, b: Entity },
    /// Something entered a trigger volume.
    TriggerEnter { trigger: Entity, other: Entity },
}

pub type Contacts = SmallVec<[Contact; 8]>;

/// Tracks which pairs are currently overlapping.
#[derive(Debug, Default)]
pub struct ContactTracker {
    touching: FxHashSet<(Entity, Entity)>,
}

impl ContactTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find overlaps that started since the last call.
    pub fn detect(&mut self, world: &World) -> Contacts {
        let bodies: Vec<(Entity, Transform, Collider)> = world
            .query::<(&Transform, &Collider)>()
            .iter()
            .map(|(entity, (transform, collider))| (entity, *transform, *collider))
            .collect();

        let mut now_touching = FxHashSet::default();
        let mut contacts = Contacts::new();

        for (i, (ea, ta, ca)) in bodies.iter().enumerate() {
            for (eb, tb, cb) in &bodies[i + 1..] {
                // Two triggers never interact
                if ca.trigger && cb.trigger {
                    continue;
                }
                let reach = ca.radius + cb.radius;
                if ta.position.distance_squared(tb.position) > reach * reach {
                    continue;
                }

                let pair = ordered(*ea, *eb);
                now_touching.insert(pair);
                if self.touching.contains(&pair) {
                    continue;
                }

                contacts.push(match (ca.trigger, cb.trigger) {
                    (true, _) => Contact::TriggerEnter {
                        trigger: *ea,
                        other: *eb,
                    },
                    (_, true) => Contact::TriggerEnter {
                        trigger: *eb,
                        other: *ea,
                    },
                    _ => Contact::Collision { a: pair.0, b: pair.1 },
                });
            }
        }

        self.touching = now_touching;
        contacts
    }

    /// Forget every tracked overlap, e.g. after the world is rebuilt.
    pub fn clear(&mut self) {
        self.touching.clear();
    }

    /// Number of pairs currently overlapping.
    #[must_use]
    pub fn touching_count(&self) -> usize {
        self.touching.len()
    }
}

fn ordered(a: Entity, b: Entity) -> (Entity, Entity) {
    if a.to_bits() <= b.to_bits() { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn body(world: &mut World, x: f32, collider: Collider) -> Entity {
        world.spawn((Transform::from_position(Vec3::new(x, 0.0, 0.0)), collider))
    }

    #[test]
    fn test_collision_reported_once_per_overlap() {
        let mut world = World::new();
        let mut tracker = ContactTracker::new();
        let a = body(&mut world, 0.0, Collider::solid(0.5));
        let b = body(&mut world, 0.8, Collider::solid(0.5));

        let first = tracker.detect(&world);
        assert_eq!(first.len(), 1);
        assert!(matches!(
            first[0],
            Contact::Collision { a: x, b: y } if (x == a && y == b) || (x == b && y == a)
        ));

        assert!(tracker.detect(&world).is_empty());
        assert_eq!(tracker.touching_count(), 1);
    }

    #[test]
    fn test_separation_rearms_pair() {
        let mut world = World::new();
        let mut tracker = ContactTracker::new();
        let _a = body(&mut world, 0.0, Collider::solid(0.5));
        let b = body(&mut world, 0.8, Collider::solid(0.5));

        assert_eq!(tracker.detect(&world).len(), 1);

        world.get_mut::<Transform>(b).unwrap().position.x = 5.0;
        assert!(tracker.detect(&world).is_empty());
        assert_eq!(tracker.touching_count(), 0);

        world.get_mut::<Transform>(b).unwrap().position.x = 0.5;
        assert_eq!(tracker.detect(&world).len(), 1);
    }

    #[test]
    fn test_trigger_enter_identifies_trigger() {
        let mut world = World::new();
        let mut tracker = ContactTracker::new();
        let zone = body(&mut world, 0.0, Collider::trigger(2.0));
        let walker = body(&mut world, 1.5, Collider::solid(0.5));

        let contacts = tracker.detect(&world);
        assert_eq!(
            contacts.as_slice(),
            &[Contact::TriggerEnter {
                trigger: zone,
                other: walker
            }]
        );
    }

    #[test]
    fn test_triggers_ignore_each_other() {
        let mut world = World::new();
        let mut tracker = ContactTracker::new();
        body(&mut world, 0.0, Collider::trigger(1.0));
        body(&mut world, 0.5, Collider::trigger(1.0));

        assert!(tracker.detect(&world).is_empty());
    }

    #[test]
    fn test_despawned_pairs_are_dropped() {
        let mut world = World::new();
        let mut tracker = ContactTracker::new();
        body(&mut world, 0.0, Collider::solid(0.5));
        let b = body(&mut world, 0.5, Collider::solid(0.5));
        tracker.detect(&world);

        world.despawn(b).unwrap();
        tracker.detect(&world);
        assert_eq!(tracker.touching_count(), 0);
    }
}
