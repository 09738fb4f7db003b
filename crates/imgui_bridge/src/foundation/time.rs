//! Time management utilities

use std::time::{Duration, Instant};

/// Per-tick frame timer used by hosts to drive the update hook
///
/// Tracks the wall-clock (unscaled) delta between ticks alongside a scaled
/// delta for gameplay. UI code always consumes the unscaled value so that
/// pausing or slowing the game does not freeze the debug interface.
pub struct FrameTimer {
    last_tick: Instant,
    unscaled_delta: Duration,
    time_scale: f32,
    total_unscaled: Duration,
    tick_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            unscaled_delta: Duration::ZERO,
            time_scale: 1.0,
            total_unscaled: Duration::ZERO,
            tick_count: 0,
        }
    }

    /// Advance the timer (call once per host tick, before the update hook)
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        self.advance(now.duration_since(self.last_tick));
        self.last_tick = now;
        self.unscaled_delta
    }

    /// Advance by an explicit amount, for hosts stepping a simulated clock
    pub fn advance(&mut self, elapsed: Duration) {
        self.unscaled_delta = elapsed;
        self.total_unscaled += elapsed;
        self.tick_count += 1;
    }

    /// Wall-clock time between the last two ticks
    pub fn unscaled_delta(&self) -> Duration {
        self.unscaled_delta
    }

    /// Delta after applying the time scale, in seconds
    pub fn scaled_delta_secs(&self) -> f32 {
        self.unscaled_delta.as_secs_f32() * self.time_scale
    }

    /// Set the gameplay time scale (0 pauses scaled time)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Current gameplay time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Total unscaled time accumulated across all ticks
    pub fn total_unscaled(&self) -> Duration {
        self.total_unscaled
    }

    /// Number of ticks advanced so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
