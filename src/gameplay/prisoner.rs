//! Prisoner NPC: watches the player from its cell, runs for the exit once
//! the key has been taken.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::ai::{NavAgent, Navigator, ease_towards, yaw_towards};
use crate::ecs::Transform;

/// Tuning for a prisoner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrisonerConfig {
    /// Turn-to-face rate (fraction of the remaining angle per second)
    pub rotation_speed: f32,
    /// Running speed toward the exit
    pub flee_speed: f32,
}

impl Default for PrisonerConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 5.0,
            flee_speed: 3.5,
        }
    }
}

/// Prisoner component.
#[derive(Debug, Clone)]
pub struct Prisoner {
    config: PrisonerConfig,
    agent: NavAgent,
    escaping: bool,
}

impl Prisoner {
    #[must_use]
    pub fn new(config: PrisonerConfig, position: Vec3) -> Self {
        let mut agent = NavAgent::new(position, config.flee_speed);
        agent.set_stopped(true);
        Self {
            config,
            agent,
            escaping: false,
        }
    }

    /// Run one tick of behavior.
    ///
    /// Before the key is collected the prisoner stays put and turns toward
    /// the player. From the first tick the key is collected onward it heads
    /// for the exit and does not go back.
    ///
    /// Returns `true` on the tick the escape starts.
    pub fn update(
        &mut self,
        transform: &mut Transform,
        key_collected: bool,
        player: Option<Vec3>,
        exit: Option<Vec3>,
        dt: f32,
    ) -> bool {
        let started = key_collected && !self.escaping;
        self.escaping |= key_collected;

        if !self.escaping {
            self.agent.set_stopped(true);
            if let Some(facing) = player.and_then(|p| yaw_towards(p - transform.position)) {
                transform.rotation =
                    ease_towards(transform.rotation, facing, self.config.rotation_speed, dt);
            }
            return false;
        }

        match exit {
            Some(exit) => self.agent.set_destination(exit),
            None if started => log::warn!("prisoner cannot escape: level has no exit"),
            None => {}
        }
        self.agent.set_stopped(false);
        started
    }

    /// Move the prisoner's body along its current path.
    pub fn step_movement(&mut self, transform: &mut Transform, dt: f32) {
        self.agent.step(transform, dt);
    }

    #[must_use]
    pub fn is_escaping(&self) -> bool {
        self.escaping
    }

    #[must_use]
    pub fn agent(&self) -> &NavAgent {
        &self.agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_faces_player_without_moving() {
        let mut prisoner = Prisoner::new(PrisonerConfig::default(), Vec3::ZERO);
        let mut body = Transform::default();
        let player = Vec3::new(6.0, 0.0, 0.0);
        let exit = Some(Vec3::new(0.0, 0.0, -30.0));

        let mut last_error = body.forward().angle_between(Vec3::X);
        for _ in 0..120 {
            prisoner.update(&mut body, false, Some(player), exit, DT);
            prisoner.step_movement(&mut body, DT);
            let error = body.forward().angle_between(Vec3::X);
            assert!(error <= last_error + 1e-5);
            last_error = error;
        }

        assert!(last_error < 0.01);
        assert_eq!(body.position, Vec3::ZERO);
        assert!(!prisoner.is_escaping());
    }

    #[test]
    fn test_turn_is_smoothed() {
        let mut prisoner = Prisoner::new(PrisonerConfig::default(), Vec3::ZERO);
        let mut body = Transform::default();

        prisoner.update(&mut body, false, Some(Vec3::new(6.0, 0.0, 0.0)), None, DT);

        let error = body.forward().angle_between(Vec3::X);
        assert!(error > 0.1, "rotation should not snap");
    }

    #[test]
    fn test_player_height_ignored_when_facing() {
        let mut prisoner = Prisoner::new(PrisonerConfig::default(), Vec3::ZERO);
        let mut body = Transform::default();

        prisoner.update(&mut body, false, Some(Vec3::new(0.0, 9.0, -4.0)), None, 1.0);
        assert!((body.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_escapes_toward_exit_once_key_collected() {
        let exit = Vec3::new(0.0, 0.0, -10.0);
        let mut prisoner = Prisoner::new(PrisonerConfig::default(), Vec3::ZERO);
        let mut body = Transform::default();

        assert!(prisoner.update(&mut body, true, None, Some(exit), DT));
        let mut last = body.position.distance(exit);
        for _ in 0..60 {
            prisoner.update(&mut body, true, None, Some(exit), DT);
            prisoner.step_movement(&mut body, DT);
            let d = body.position.distance(exit);
            assert!(d < last);
            last = d;
        }
        assert!((last - (10.0 - 3.5)).abs() < 0.05);
    }

    #[test]
    fn test_escape_is_latched() {
        let mut prisoner = Prisoner::new(PrisonerConfig::default(), Vec3::ZERO);
        let mut body = Transform::default();
        let exit = Some(Vec3::new(0.0, 0.0, -10.0));

        prisoner.update(&mut body, true, None, exit, DT);
        assert!(!prisoner.update(&mut body, false, None, exit, DT));
        assert!(prisoner.is_escaping());
        assert!(!prisoner.agent().is_stopped());
    }
}
