//! Finite State Machine for AI Behavior
//!
//! Provides a generic state machine for managing AI entity behavior.
//! States encapsulate behavior logic with enter/update/exit lifecycle hooks,
//! while data that must outlive a single state lives in the context.
//!
//! # Example
//!
//! ```ignore
//! struct Patrol;
//! struct Pursue { target: Entity }
//!
//! impl State<GuardContext> for Patrol {
//!     fn name(&self) -> &'static str { "Patrol" }
//!
//!     fn update(&mut self, ctx: &mut GuardContext) -> Transition<GuardContext> {
//!         match ctx.spot_target() {
//!             Some(target) => Transition::to(Pursue { target }),
//!             None => Transition::None,
//!         }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Patrol);
//! fsm.update(&mut ctx);  // May transition to Pursue
//! ```

use std::fmt;

// ============================================================================
// State Trait
// ============================================================================

/// A state in the finite state machine.
///
/// The lifecycle is:
///
/// 1. `enter()` - Called once when entering this state
/// 2. `update()` - Called each tick while in this state
/// 3. `exit()` - Called once when leaving this state
///
/// States are `Send + Sync` so a machine can be stored as an ECS component.
pub trait State<Ctx = ()>: fmt::Debug + Send + Sync {
    /// State name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Called when entering this state.
    fn enter(&mut self, _ctx: &mut Ctx) {}

    /// Called each tick while in this state.
    ///
    /// Returns a `Transition` to indicate whether to stay or change states.
    fn update(&mut self, ctx: &mut Ctx) -> Transition<Ctx>;

    /// Called when exiting this state.
    fn exit(&mut self, _ctx: &mut Ctx) {}
}

// ============================================================================
// Transition
// ============================================================================

/// Represents a state transition decision returned from `State::update()`.
pub enum Transition<Ctx = ()> {
    /// Stay in the current state.
    None,
    /// Transition to a new state.
    To(Box<dyn State<Ctx>>),
}

impl<Ctx> Transition<Ctx> {
    /// Create a transition to a new state.
    pub fn to<S: State<Ctx> + 'static>(state: S) -> Self {
        Transition::To(Box::new(state))
    }
}

impl<Ctx> fmt::Debug for Transition<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::None => write!(f, "Transition::None"),
            Transition::To(state) => write!(f, "Transition::To({})", state.name()),
        }
    }
}

// ============================================================================
// State Machine
// ============================================================================

/// A finite state machine that manages state transitions.
///
/// The FSM owns the current state and handles the lifecycle of entering,
/// updating, and exiting states.
///
/// # Type Parameters
///
/// - `Ctx`: Context type passed to state methods (sensor snapshot, agent, ...)
pub struct StateMachine<Ctx = ()> {
    /// Current active state
    current: Box<dyn State<Ctx>>,
    /// Whether enter() has been called on current state
    entered: bool,
}

impl<Ctx> StateMachine<Ctx> {
    /// Create a new state machine with an initial state.
    ///
    /// The initial state's `enter()` will be called on the first `update()`.
    pub fn new<S: State<Ctx> + 'static>(initial: S) -> Self {
        Self {
            current: Box::new(initial),
            entered: false,
        }
    }

    /// Update the state machine.
    ///
    /// Calls `enter()` on first update, then `update()` each tick.
    /// Handles transitions by calling `exit()` on old state and `enter()` on new.
    pub fn update(&mut self, ctx: &mut Ctx) {
        if !self.entered {
            self.current.enter(ctx);
            self.entered = true;
        }

        let transition = self.current.update(ctx);

        if let Transition::To(mut new_state) = transition {
            log::trace!(
                "fsm: {} -> {}",
                self.current.name(),
                new_state.name()
            );
            self.current.exit(ctx);
            new_state.enter(ctx);
            self.current = new_state;
            self.entered = true;
        }
    }

    /// Force a transition to a new state.
    ///
    /// Immediately exits the current state (if it was entered) and enters
    /// the new one. Transitioning into a state of the same kind is allowed
    /// and re-runs its `enter()`.
    pub fn transition<S: State<Ctx> + 'static>(&mut self, ctx: &mut Ctx, new_state: S) {
        if self.entered {
            self.current.exit(ctx);
        }

        self.current = Box::new(new_state);
        self.current.enter(ctx);
        self.entered = true;
    }

    /// Get the name of the current state.
    #[must_use]
    pub fn current_state_name(&self) -> &'static str {
        self.current.name()
    }

    /// Check if the FSM is in a state with the given name.
    #[must_use]
    pub fn is_in_state(&self, name: &str) -> bool {
        self.current.name() == name
    }
}

impl<Ctx> fmt::Debug for StateMachine<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current.name())
            .field("entered", &self.entered)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct DoorContext {
        delta_time: f32,
        alarm: bool,
        opened_for: f32,
        log: Vec<&'static str>,
    }

    #[derive(Debug)]
    struct Closed;

    #[derive(Debug)]
    struct Open;

    impl State<DoorContext> for Closed {
        fn name(&self) -> &'static str {
            "Closed"
        }

        fn enter(&mut self, ctx: &mut DoorContext) {
            ctx.log.push("enter Closed");
        }

        fn update(&mut self, ctx: &mut DoorContext) -> Transition<DoorContext> {
            if ctx.alarm {
                Transition::to(Open)
            } else {
                Transition::None
            }
        }

        fn exit(&mut self, ctx: &mut DoorContext) {
            ctx.log.push("exit Closed");
        }
    }

    impl State<DoorContext> for Open {
        fn name(&self) -> &'static str {
            "Open"
        }

        fn enter(&mut self, ctx: &mut DoorContext) {
            ctx.opened_for = 0.0;
            ctx.log.push("enter Open");
        }

        fn update(&mut self, ctx: &mut DoorContext) -> Transition<DoorContext> {
            ctx.opened_for += ctx.delta_time;
            if ctx.opened_for >= 1.0 {
                Transition::to(Closed)
            } else {
                Transition::None
            }
        }

        fn exit(&mut self, ctx: &mut DoorContext) {
            ctx.log.push("exit Open");
        }
    }

    #[test]
    fn test_fsm_initial_state() {
        let fsm: StateMachine<DoorContext> = StateMachine::new(Closed);
        assert_eq!(fsm.current_state_name(), "Closed");
        assert!(!fsm.entered);
    }

    #[test]
    fn test_fsm_enter_called_on_first_update() {
        let mut fsm = StateMachine::new(Closed);
        let mut ctx = DoorContext::default();

        fsm.update(&mut ctx);

        assert!(fsm.entered);
        assert_eq!(ctx.log, vec!["enter Closed"]);
    }

    #[test]
    fn test_fsm_transition_runs_exit_then_enter() {
        let mut fsm = StateMachine::new(Closed);
        let mut ctx = DoorContext {
            alarm: true,
            ..Default::default()
        };

        fsm.update(&mut ctx);

        assert_eq!(fsm.current_state_name(), "Open");
        assert_eq!(ctx.log, vec!["enter Closed", "exit Closed", "enter Open"]);
    }

    #[test]
    fn test_fsm_transition_on_timeout() {
        let mut fsm = StateMachine::new(Open);
        let mut ctx = DoorContext {
            delta_time: 0.4,
            ..Default::default()
        };

        fsm.update(&mut ctx);
        fsm.update(&mut ctx);
        assert!(fsm.is_in_state("Open"));

        fsm.update(&mut ctx);
        assert!(fsm.is_in_state("Closed"));
    }

    #[test]
    fn test_forced_transition_before_first_update_skips_exit() {
        let mut fsm = StateMachine::new(Closed);
        let mut ctx = DoorContext::default();

        fsm.transition(&mut ctx, Open);

        assert_eq!(fsm.current_state_name(), "Open");
        assert_eq!(ctx.log, vec!["enter Open"]);
    }

    #[test]
    fn test_forced_transition_into_same_state_reenters() {
        let mut fsm = StateMachine::new(Closed);
        let mut ctx = DoorContext::default();
        fsm.update(&mut ctx);

        fsm.transition(&mut ctx, Closed);

        assert_eq!(ctx.log, vec!["enter Closed", "exit Closed", "enter Closed"]);
    }
}
