//! Scripted player movement for headless runs
//!
//! There is no input device in the simulation, so the player walks a fixed
//! list of waypoints once and then stands still.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::ai::{NavAgent, Navigator};
use crate::ecs::Transform;

/// Waypoints the player walks through, in order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerScript {
    #[serde(default)]
    pub waypoints: Vec<Vec3>,
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speed() -> f32 {
    4.0
}

/// Drives the player entity along a [`PlayerScript`].
#[derive(Debug, Clone)]
pub struct ScriptedWalker {
    agent: NavAgent,
    waypoints: Vec<Vec3>,
    next: usize,
}

impl ScriptedWalker {
    #[must_use]
    pub fn new(script: &PlayerScript, position: Vec3) -> Self {
        Self {
            agent: NavAgent::new(position, script.speed),
            waypoints: script.waypoints.clone(),
            next: 0,
        }
    }

    /// Pick the next waypoint when the last one is reached, then move.
    pub fn update(&mut self, transform: &mut Transform, dt: f32) {
        if self.agent.has_arrived() {
            if let Some(&waypoint) = self.waypoints.get(self.next) {
                self.next += 1;
                self.agent.set_destination(waypoint);
            }
        }
        self.agent.step(transform, dt);
    }

    /// Whether every waypoint has been reached.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.next >= self.waypoints.len() && self.agent.has_arrived()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_waypoints_in_order() {
        let script = PlayerScript {
            waypoints: vec![Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, -2.0)],
            speed: 4.0,
        };
        let mut walker = ScriptedWalker::new(&script, Vec3::ZERO);
        let mut body = Transform::default();

        for _ in 0..10 {
            walker.update(&mut body, 0.1);
        }
        assert!((body.position - Vec3::new(2.0, 0.0, -2.0)).length() < 1e-4);

        walker.update(&mut body, 0.1);
        assert!(walker.is_done());
    }

    #[test]
    fn test_empty_script_stands_still() {
        let mut walker = ScriptedWalker::new(&PlayerScript::default(), Vec3::X);
        let mut body = Transform::from_position(Vec3::X);
        walker.update(&mut body, 1.0);
        assert_eq!(body.position, Vec3::X);
        assert!(walker.is_done());
    }
}
