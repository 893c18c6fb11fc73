//! Simulation clock
//!
//! Time only moves when the scheduler says so: every tick carries an explicit
//! delta, which keeps runs reproducible.

/// Simulated time since the level started
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    delta: f32,
    elapsed: f64,
    tick: u64,
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick of `delta` seconds.
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta;
        self.elapsed += f64::from(delta);
        self.tick += 1;
    }

    /// Delta of the most recent tick, in seconds
    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Total simulated seconds
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Number of ticks run
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Restart from zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
