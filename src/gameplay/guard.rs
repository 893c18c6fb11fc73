//! Guard AI: patrol a route, pursue whatever enters the vision cone.
//!
//! Two states drive the guard. `Patrol` walks a cyclic waypoint route and
//! watches the cone; `Pursue` chases one target and gives up after the target
//! has been out of sight for `return_to_patrol_delay` seconds in a row.
//! Route progress and the pursuit record live in [`GuardContext`] so they
//! survive state changes.

use glam::Vec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::ai::{
    NavAgent, Navigator, Sighting, State, StateMachine, Transition, VisionCone, detect_target,
};
use crate::ecs::Transform;
use crate::visual::{ALERT_RED, AlertVisual};

const PATROL: &str = "Patrol";
const PURSUE: &str = "Pursue";

/// Tuning for a guard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Sight distance in world units
    pub detection_distance: f32,
    /// Half-angle of the vision cone in degrees
    pub detection_angle: f32,
    /// Walking speed on the route
    pub patrol_speed: f32,
    /// Running speed while pursuing
    pub pursue_speed: f32,
    /// Seconds a target may stay out of sight before the guard gives up
    pub return_to_patrol_delay: f32,
    /// Spotlight colour while pursuing
    pub alert_light_color: Vec3,
}

impl GuardConfig {
    #[must_use]
    pub fn vision(&self) -> VisionCone {
        VisionCone::new(self.detection_distance, self.detection_angle)
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            detection_distance: 10.0,
            detection_angle: 45.0,
            patrol_speed: 1.5,
            pursue_speed: 3.5,
            return_to_patrol_delay: 5.0,
            alert_light_color: ALERT_RED,
        }
    }
}

/// Cyclic list of waypoints.
#[derive(Debug, Clone, Default)]
pub struct PatrolRoute {
    waypoints: Vec<Vec3>,
    current: usize,
}

impl PatrolRoute {
    #[must_use]
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self {
            waypoints,
            current: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Index of the waypoint being walked to
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Waypoint being walked to
    #[must_use]
    pub fn current(&self) -> Option<Vec3> {
        self.waypoints.get(self.current).copied()
    }

    /// Move on to the next waypoint, wrapping at the end.
    pub fn advance(&mut self) -> Option<Vec3> {
        if self.waypoints.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.waypoints.len();
        self.current()
    }
}

/// What a guard can see this tick.
#[derive(Debug, Clone, Default)]
pub struct Outlook {
    pub delta_time: f32,
    /// Guard's own position
    pub position: Vec3,
    /// Guard's facing
    pub forward: Vec3,
    /// Prisoners are fair game once the key is gone
    pub key_collected: bool,
    pub player: Option<Sighting>,
    /// Every live prisoner, in registry order
    pub prisoners: Vec<Sighting>,
}

impl Outlook {
    /// Live position of a candidate target, or `None` once it is gone.
    #[must_use]
    pub fn position_of(&self, entity: Entity) -> Option<Vec3> {
        self.player
            .iter()
            .chain(self.prisoners.iter())
            .find(|s| s.entity == entity)
            .map(|s| s.position)
    }
}

/// The single target a guard is chasing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pursuit {
    pub target: Entity,
    /// Seconds of unbroken invisibility
    pub unseen_for: f32,
}

/// Data shared by the guard's states.
#[derive(Debug)]
pub struct GuardContext {
    pub config: GuardConfig,
    pub route: PatrolRoute,
    pub agent: NavAgent,
    pub visual: AlertVisual,
    pub pursuit: Option<Pursuit>,
    pub outlook: Outlook,
}

impl GuardContext {
    fn sees(&self, position: Vec3) -> bool {
        self.config
            .vision()
            .can_see(self.outlook.position, self.outlook.forward, position)
    }
}

#[derive(Debug)]
struct Patrolling;

impl State<GuardContext> for Patrolling {
    fn name(&self) -> &'static str {
        PATROL
    }

    fn enter(&mut self, ctx: &mut GuardContext) {
        ctx.agent.set_speed(ctx.config.patrol_speed);
        ctx.visual.stand_down();
        match ctx.route.current() {
            Some(waypoint) => ctx.agent.set_destination(waypoint),
            // No route: hold position
            None => ctx.agent.set_destination(ctx.outlook.position),
        }
    }

    fn update(&mut self, ctx: &mut GuardContext) -> Transition<GuardContext> {
        let outlook = &ctx.outlook;
        let spotted = detect_target(
            &ctx.config.vision(),
            outlook.position,
            outlook.forward,
            outlook.player.as_ref(),
            &outlook.prisoners,
            outlook.key_collected,
        );
        if let Some(target) = spotted {
            return Transition::to(Pursuing { target });
        }

        if !ctx.route.is_empty() && ctx.agent.has_arrived() {
            if let Some(next) = ctx.route.advance() {
                log::trace!("guard heading to waypoint {}", ctx.route.current_index());
                ctx.agent.set_destination(next);
            }
        }

        Transition::None
    }
}

#[derive(Debug)]
struct Pursuing {
    target: Entity,
}

impl State<GuardContext> for Pursuing {
    fn name(&self) -> &'static str {
        PURSUE
    }

    fn enter(&mut self, ctx: &mut GuardContext) {
        ctx.pursuit = Some(Pursuit {
            target: self.target,
            unseen_for: 0.0,
        });
        ctx.agent.set_speed(ctx.config.pursue_speed);
        ctx.visual.raise_alert();
        if let Some(position) = ctx.outlook.position_of(self.target) {
            ctx.agent.set_destination(position);
        }
    }

    fn update(&mut self, ctx: &mut GuardContext) -> Transition<GuardContext> {
        let live = ctx.outlook.position_of(self.target);
        if let Some(position) = live {
            ctx.agent.set_destination(position);
        }
        let visible = live.is_some_and(|position| ctx.sees(position));

        let delta_time = ctx.outlook.delta_time;
        let delay = ctx.config.return_to_patrol_delay;
        let Some(pursuit) = ctx.pursuit.as_mut() else {
            return Transition::to(Patrolling);
        };

        if visible {
            pursuit.unseen_for = 0.0;
            return Transition::None;
        }

        pursuit.unseen_for += delta_time;
        if pursuit.unseen_for >= delay {
            log::debug!(
                "target {:?} unseen for {:.2}s, giving up",
                self.target,
                pursuit.unseen_for
            );
            return Transition::to(Patrolling);
        }

        Transition::None
    }

    fn exit(&mut self, ctx: &mut GuardContext) {
        ctx.pursuit = None;
    }
}

/// Coarse guard behavior, for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardMode {
    Patrol,
    Pursue,
}

/// A change of mode produced by one guard update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardShift {
    Alerted { target: Entity },
    StoodDown,
}

/// Guard component.
#[derive(Debug)]
pub struct Guard {
    brain: StateMachine<GuardContext>,
    ctx: GuardContext,
}

impl Guard {
    /// Create a guard standing at `position`.
    ///
    /// An empty route is allowed: the guard stands still but keeps watching
    /// and will still give chase.
    #[must_use]
    pub fn new(config: GuardConfig, route: Vec<Vec3>, position: Vec3, visual: AlertVisual) -> Self {
        if route.is_empty() {
            log::warn!("guard at {position} has no patrol route and will stand idle");
        }
        Self {
            brain: StateMachine::new(Patrolling),
            ctx: GuardContext {
                agent: NavAgent::new(position, config.patrol_speed),
                config,
                route: PatrolRoute::new(route),
                visual,
                pursuit: None,
                outlook: Outlook::default(),
            },
        }
    }

    /// Run one tick of perception and decision making.
    pub fn update(&mut self, outlook: Outlook) -> Option<GuardShift> {
        let before = self.ctx.pursuit.map(|p| p.target);
        self.ctx.outlook = outlook;
        self.brain.update(&mut self.ctx);
        let after = self.ctx.pursuit.map(|p| p.target);

        match (before, after) {
            (None, Some(target)) => Some(GuardShift::Alerted { target }),
            (Some(_), None) => Some(GuardShift::StoodDown),
            _ => None,
        }
    }

    /// Drop any pursuit and walk back to the route immediately.
    pub fn stand_down(&mut self) -> Option<GuardShift> {
        let was_pursuing = self.ctx.pursuit.is_some();
        self.brain.transition(&mut self.ctx, Patrolling);
        was_pursuing.then_some(GuardShift::StoodDown)
    }

    /// Move the guard's body along its current path.
    pub fn step_movement(&mut self, transform: &mut Transform, dt: f32) {
        self.ctx.agent.step(transform, dt);
    }

    #[must_use]
    pub fn mode(&self) -> GuardMode {
        if self.brain.is_in_state(PURSUE) {
            GuardMode::Pursue
        } else {
            GuardMode::Patrol
        }
    }

    #[must_use]
    pub fn is_pursuing(&self) -> bool {
        self.mode() == GuardMode::Pursue
    }

    #[must_use]
    pub fn target(&self) -> Option<Entity> {
        self.ctx.pursuit.map(|p| p.target)
    }

    /// Seconds the current target has been out of sight (0 when not pursuing)
    #[must_use]
    pub fn unseen_for(&self) -> f32 {
        self.ctx.pursuit.map_or(0.0, |p| p.unseen_for)
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.ctx.config
    }

    #[must_use]
    pub fn route(&self) -> &PatrolRoute {
        &self.ctx.route
    }

    #[must_use]
    pub fn agent(&self) -> &NavAgent {
        &self.ctx.agent
    }

    #[must_use]
    pub fn visual(&self) -> &AlertVisual {
        &self.ctx.visual
    }
}
