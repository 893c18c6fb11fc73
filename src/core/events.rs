//! Event Queue for Gameplay Notifications
//!
//! A double-buffered queue that lets observers (logging, UI, tests) see what
//! happened during a tick without gameplay code knowing who is listening.
//! Events are pushed while a tick runs and become readable once the
//! simulation swaps the buffers at the end of that tick.
//!
//! # Example
//!
//! ```ignore
//! simulation.tick(dt);
//! for event in simulation.events().iter() {
//!     if let GameEvent::GameOver { guard } = event {
//!         show_caught_screen(*guard);
//!     }
//! }
//! ```

use std::collections::VecDeque;

use hecs::Entity;

// ============================================================================
// Event Types
// ============================================================================

/// Why an entity was removed from play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyCause {
    /// A guard caught the prisoner
    Caught,
    /// The entity walked into the exit zone
    ReachedExit,
    /// The key was taken
    Unlocked,
}

/// Things that happened in the level.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GameEvent {
    // -------------------------------------------------------------------------
    // Guard Events
    // -------------------------------------------------------------------------
    /// A guard spotted a target and started chasing it.
    GuardAlerted {
        guard: Entity,
        target: Entity,
    },

    /// A guard gave up its chase and went back to patrolling.
    GuardStoodDown {
        guard: Entity,
    },

    // -------------------------------------------------------------------------
    // World Events
    // -------------------------------------------------------------------------
    /// The player picked up the key.
    KeyCollected {
        /// Number of barriers removed
        barriers_removed: usize,
    },

    /// A prisoner began running for the exit.
    PrisonerEscaping {
        prisoner: Entity,
    },

    /// An entity was removed from play.
    EntityDestroyed {
        entity: Entity,
        cause: DestroyCause,
    },

    // -------------------------------------------------------------------------
    // Game Flow Events
    // -------------------------------------------------------------------------
    /// A guard caught the player.
    GameOver {
        guard: Entity,
    },

    /// The player reached the exit.
    LevelCompleted,

    /// A level was (re)loaded.
    LevelLoaded {
        index: usize,
        name: String,
    },
}

// ============================================================================
// Event Queue
// ============================================================================

/// Double-buffered event queue.
///
/// Events pushed during tick N are available for reading after the swap
/// that ends tick N, until the swap that ends tick N+1.
#[derive(Debug)]
pub struct EventQueue {
    /// Events being written this tick
    pending: VecDeque<GameEvent>,
    /// Events from the last completed tick
    processing: VecDeque<GameEvent>,
}

impl EventQueue {
    /// Default initial capacity for event queues.
    const DEFAULT_CAPACITY: usize = 64;

    /// Create a new event queue with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a new event queue with specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            processing: VecDeque::with_capacity(capacity),
        }
    }

    /// Push an event; it becomes visible after the next `swap()`.
    #[inline]
    pub fn push(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Swap the pending and processing queues.
    ///
    /// Call this once per tick, at the tick boundary.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    /// Iterate over events from the last completed tick.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.processing.iter()
    }

    /// Drain all events from the last completed tick.
    #[inline]
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.processing.drain(..)
    }

    /// Check if there are any events to process.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    /// Get the number of events ready for processing.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.processing.len()
    }

    /// Get the number of events pushed since the last swap.
    #[must_use]
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Clear all events (both pending and processing).
    ///
    /// Used when a level is reloaded.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.processing.clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_entity() -> Entity {
        let mut world = hecs::World::new();
        world.spawn(())
    }

    #[test]
    fn test_event_queue_push_and_swap() {
        let mut queue = EventQueue::new();

        queue.push(GameEvent::LevelCompleted);
        assert!(queue.is_empty(), "Events should not be visible before swap");

        queue.swap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next(), Some(&GameEvent::LevelCompleted));
    }

    #[test]
    fn test_event_queue_double_buffer_isolation() {
        let mut queue = EventQueue::new();
        let guard = test_entity();

        queue.push(GameEvent::GameOver { guard });
        queue.swap();

        queue.push(GameEvent::LevelCompleted);

        let events: Vec<_> = queue.iter().collect();
        assert_eq!(events, vec![&GameEvent::GameOver { guard }]);

        queue.swap();
        let events: Vec<_> = queue.iter().collect();
        assert_eq!(events, vec![&GameEvent::LevelCompleted]);
    }

    #[test]
    fn test_event_queue_drain() {
        let mut queue = EventQueue::new();

        queue.push(GameEvent::KeyCollected {
            barriers_removed: 2,
        });
        queue.push(GameEvent::LevelCompleted);
        queue.swap();

        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_queue_clear() {
        let mut queue = EventQueue::new();

        queue.push(GameEvent::LevelCompleted);
        queue.swap();
        queue.push(GameEvent::LevelCompleted);

        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.pending_count(), 0);
    }
}
