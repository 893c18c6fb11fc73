//! Steering helpers for agent movement and facing
//!
//! Kinematic rather than force based: agents move at their set speed and
//! turn toward their heading.

use glam::{Quat, Vec3};

/// Rotation about +Y that points the local forward axis (-Z) along the
/// horizontal projection of `direction`.
///
/// Returns `None` when `direction` has no horizontal component.
#[must_use]
pub fn yaw_towards(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= 1.0e-8 {
        return None;
    }
    let flat = flat.normalize();
    Some(Quat::from_rotation_y((-flat.x).atan2(-flat.z)))
}

/// Interpolate `from` toward `to` by `rate * dt`, clamped to a full step.
///
/// The fraction is relative to the remaining angle, so the heading eases in
/// rather than turning at constant speed.
#[must_use]
pub fn ease_towards(from: Quat, to: Quat, rate: f32, dt: f32) -> Quat {
    let t = (rate * dt).clamp(0.0, 1.0);
    from.slerp(to, t).normalize()
}

/// Turn `from` toward `to` by at most `max_radians`.
#[must_use]
pub fn turn_towards(from: Quat, to: Quat, max_radians: f32) -> Quat {
    let angle = from.angle_between(to);
    if angle <= max_radians || angle <= f32::EPSILON {
        return to;
    }
    from.slerp(to, max_radians / angle).normalize()
}

/// Move `position` toward `target` by at most `max_distance`, landing exactly
/// on the target when it is within reach.
#[must_use]
pub fn seek_step(position: Vec3, target: Vec3, max_distance: f32) -> Vec3 {
    let to_target = target - position;
    let distance = to_target.length();
    if distance <= max_distance || distance <= f32::EPSILON {
        return target;
    }
    position + to_target / distance * max_distance
}
