//! Tick statistics

use std::collections::VecDeque;
use std::time::Duration;

/// Wall-clock cost of simulation ticks
#[derive(Debug)]
pub struct TickStats {
    /// Recent tick durations for averaging
    samples: VecDeque<Duration>,
    /// Maximum samples to keep
    max_samples: usize,
    /// Average tick time in milliseconds
    avg_tick_ms: f32,
    /// Slowest recent tick in milliseconds
    max_tick_ms: f32,
    /// Total ticks recorded
    total_ticks: u64,
}

impl TickStats {
    /// Create a new tracker keeping the last 120 samples
    pub fn new() -> Self {
        Self::with_window(120)
    }

    pub fn with_window(max_samples: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples: max_samples.max(1),
            avg_tick_ms: 0.0,
            max_tick_ms: 0.0,
            total_ticks: 0,
        }
    }

    /// Record how long a tick took
    pub fn record_tick(&mut self, cost: Duration) {
        self.total_ticks += 1;

        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(cost);

        let total: Duration = self.samples.iter().sum();
        let max = self.samples.iter().max().copied().unwrap_or_default();
        self.avg_tick_ms = total.as_secs_f32() * 1000.0 / self.samples.len() as f32;
        self.max_tick_ms = max.as_secs_f32() * 1000.0;
    }

    pub fn avg_tick_ms(&self) -> f32 {
        self.avg_tick_ms
    }

    pub fn max_tick_ms(&self) -> f32 {
        self.max_tick_ms
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// One-line summary for logs
    pub fn format_stats(&self) -> String {
        format!(
            "ticks: {} | tick: {:.3}ms avg, {:.3}ms max",
            self.total_ticks, self.avg_tick_ms, self.max_tick_ms
        )
    }
}

impl Default for TickStats {
    fn default() -> Self {
        Self::new()
    }
}
