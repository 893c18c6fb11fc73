//! Vision cone perception
//!
//! Purely geometric: a target is seen when it is close enough and inside the
//! cone around the observer's forward vector. Nothing is raycast, so walls do
//! not block sight.

use glam::Vec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};

/// A candidate target as seen by a sensor: identity plus live position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    pub entity: Entity,
    pub position: Vec3,
}

impl Sighting {
    #[must_use]
    pub const fn new(entity: Entity, position: Vec3) -> Self {
        Self { entity, position }
    }
}

/// Field of view approximated by a distance and a half-angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisionCone {
    /// Maximum sight distance in world units
    pub distance: f32,
    /// Half-angle of the cone in degrees
    pub angle_degrees: f32,
}

impl VisionCone {
    #[must_use]
    pub const fn new(distance: f32, angle_degrees: f32) -> Self {
        Self {
            distance,
            angle_degrees,
        }
    }

    /// Check whether `target` is inside the cone of an observer at `eye`
    /// looking along `forward`. Boundary values count as visible.
    ///
    /// The angle test compares cosines, so no `acos` rounding widens or
    /// narrows the cone.
    #[must_use]
    pub fn can_see(&self, eye: Vec3, forward: Vec3, target: Vec3) -> bool {
        let to_target = target - eye;
        let distance = to_target.length();
        if distance > self.distance {
            return false;
        }
        if distance <= f32::EPSILON || forward.length_squared() <= f32::EPSILON {
            return true;
        }
        let cos_limit = self.angle_degrees.to_radians().cos();
        forward.dot(to_target) >= forward.length() * distance * cos_limit
    }
}

impl Default for VisionCone {
    fn default() -> Self {
        Self::new(10.0, 45.0)
    }
}

/// Pick a target to pursue.
///
/// The player always has priority. Prisoners are only considered once they
/// are trying to escape, and the first one inside the cone wins regardless of
/// distance.
#[must_use]
pub fn detect_target(
    cone: &VisionCone,
    eye: Vec3,
    forward: Vec3,
    player: Option<&Sighting>,
    prisoners: &[Sighting],
    prisoners_escaping: bool,
) -> Option<Entity> {
    if let Some(player) = player.filter(|p| cone.can_see(eye, forward, p.position)) {
        return Some(player.entity);
    }

    if !prisoners_escaping {
        return None;
    }

    prisoners
        .iter()
        .find(|prisoner| cone.can_see(eye, forward, prisoner.position))
        .map(|prisoner| prisoner.entity)
}
