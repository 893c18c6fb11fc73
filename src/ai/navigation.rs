//! Navigation agents
//!
//! `Navigator` is the capability gameplay code drives: pick a destination,
//! read back progress, tune speed. `NavAgent` implements it with straight-line
//! movement; there is no navmesh and obstacles are ignored.

use glam::Vec3;

use super::steering::{seek_step, turn_towards, yaw_towards};
use crate::ecs::Transform;

/// Default turn rate in degrees per second.
pub const DEFAULT_ANGULAR_SPEED: f32 = 120.0;

/// Default distance at which a destination counts as reached.
pub const DEFAULT_STOPPING_DISTANCE: f32 = 0.1;

/// Movement capability consumed by AI behaviors.
pub trait Navigator {
    /// Request movement toward `destination`.
    fn set_destination(&mut self, destination: Vec3);

    /// Current destination, if one was requested.
    fn destination(&self) -> Option<Vec3>;

    /// Distance left to the destination as of the last movement step.
    fn remaining_distance(&self) -> f32;

    /// Distance at which the agent considers itself arrived.
    fn stopping_distance(&self) -> f32;

    /// Whether a route toward a new destination has not been computed yet.
    fn path_pending(&self) -> bool;

    fn speed(&self) -> f32;

    fn set_speed(&mut self, speed: f32);

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    fn is_stopped(&self) -> bool;

    /// Halt or resume movement without forgetting the destination.
    fn set_stopped(&mut self, stopped: bool);

    /// Arrived at the destination with no route computation outstanding.
    fn has_arrived(&self) -> bool {
        !self.path_pending() && self.remaining_distance() <= self.stopping_distance()
    }
}

/// Straight-line navigation agent.
#[derive(Debug, Clone)]
pub struct NavAgent {
    /// Movement speed in units per second
    speed: f32,
    /// Turn rate in degrees per second
    pub angular_speed: f32,
    /// Arrival threshold
    pub stopping_distance: f32,
    /// Position observed at the last step
    position: Vec3,
    destination: Option<Vec3>,
    path_pending: bool,
    enabled: bool,
    stopped: bool,
}

impl NavAgent {
    /// Create an agent standing at `position`.
    #[must_use]
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            speed,
            angular_speed: DEFAULT_ANGULAR_SPEED,
            stopping_distance: DEFAULT_STOPPING_DISTANCE,
            position,
            destination: None,
            path_pending: false,
            enabled: true,
            stopped: false,
        }
    }

    /// Advance `transform` toward the destination for one tick.
    ///
    /// Clears `path_pending`: the route is considered computed once the
    /// agent has had a step to act on it.
    pub fn step(&mut self, transform: &mut Transform, dt: f32) {
        self.position = transform.position;
        self.path_pending = false;

        if !self.enabled || self.stopped {
            return;
        }
        let Some(destination) = self.destination else {
            return;
        };

        let heading = destination - transform.position;
        transform.position = seek_step(transform.position, destination, self.speed * dt);

        if let Some(facing) = yaw_towards(heading) {
            let max_turn = self.angular_speed.to_radians() * dt;
            transform.rotation = turn_towards(transform.rotation, facing, max_turn);
        }

        self.position = transform.position;
    }
}

impl Navigator for NavAgent {
    fn set_destination(&mut self, destination: Vec3) {
        if self.destination != Some(destination) {
            self.path_pending = true;
        }
        self.destination = Some(destination);
    }

    fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    fn remaining_distance(&self) -> f32 {
        self.destination
            .map_or(0.0, |destination| self.position.distance(destination))
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    fn path_pending(&self) -> bool {
        self.path_pending
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }
}
