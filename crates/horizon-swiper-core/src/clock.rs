//! Frame clock for driving animations and timers.
//!
//! The clock does not read wall-clock time. The host advances it from its
//! animation-frame callback, which keeps every time-dependent computation in
//! the engine reproducible.

use std::time::Duration;

/// Elapsed time since the engine was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    elapsed: Duration,
}

impl FrameClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current point on the timeline.
    #[inline]
    pub fn now(&self) -> Duration {
        self.elapsed
    }

    /// Move the clock forward by `dt` and return the new time.
    pub fn advance(&mut self, dt: Duration) -> Duration {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.elapsed
    }
}
