//! Time-driven forward paging.
//!
//! [`AutoplayScheduler`] owns at most one repeating timer on the engine's
//! [`TimerManager`]. Every reconfiguration cancels the live timer before
//! arming a new one, so a prop change always opens a fresh interval window.

use std::time::Duration;

use horizon_swiper_core::{TimerId, TimerManager};

use crate::index::PageIndexModel;

/// Default autoplay interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 5000;

/// What an autoplay tick should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayAction {
    /// Page forward.
    Advance,
    /// Jump back to the first page (last page, non-circular).
    ResetToFirst,
    /// Nothing to do (fewer than two pages).
    Skip,
}

/// Cancelable repeating timer that pages forward.
#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    enabled: bool,
    interval: Duration,
    timer: Option<TimerId>,
}

impl Default for AutoplayScheduler {
    fn default() -> Self {
        Self::new(false, Duration::from_millis(DEFAULT_INTERVAL_MS))
    }
}

impl AutoplayScheduler {
    /// Create a scheduler. No timer is armed until [`rearm`](Self::rearm).
    pub fn new(enabled: bool, interval: Duration) -> Self {
        Self {
            enabled,
            interval,
            timer: None,
        }
    }

    /// Whether autoplay is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The configured interval.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The live timer, if armed.
    #[inline]
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Apply new settings, then cancel and re-arm.
    ///
    /// Always replaces the timer, even when the settings are unchanged.
    pub fn configure(
        &mut self,
        timers: &mut TimerManager,
        now: Duration,
        enabled: bool,
        interval: Duration,
    ) {
        self.enabled = enabled;
        self.interval = interval;
        self.rearm(timers, now);
    }

    /// Cancel the live timer and, when enabled, start a fresh one.
    pub fn rearm(&mut self, timers: &mut TimerManager, now: Duration) {
        self.cancel(timers);
        if !self.enabled {
            return;
        }
        let id = timers.start_repeating(now, self.interval);
        self.timer = Some(id);
        tracing::debug!(
            target: "horizon_swiper::autoplay",
            interval = ?self.interval,
            "autoplay armed"
        );
    }

    /// Cancel the live timer, if any.
    pub fn cancel(&mut self, timers: &mut TimerManager) {
        let Some(id) = self.timer.take() else {
            return;
        };
        if timers.stop(id).is_err() {
            tracing::trace!(target: "horizon_swiper::autoplay", "autoplay timer already gone");
        } else {
            tracing::debug!(target: "horizon_swiper::autoplay", "autoplay cancelled");
        }
    }

    /// Whether `id` is this scheduler's live timer.
    #[inline]
    pub fn owns_timer(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// Decide what a tick does for the current page state.
    pub fn tick_action(&self, model: &PageIndexModel) -> AutoplayAction {
        if model.count() < 2 {
            AutoplayAction::Skip
        } else if model.is_last() && !model.is_circular() {
            AutoplayAction::ResetToFirst
        } else {
            AutoplayAction::Advance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_disabled_arms_nothing() {
        let mut timers = TimerManager::new();
        let mut scheduler = AutoplayScheduler::default();
        scheduler.rearm(&mut timers, ms(0));
        assert_eq!(scheduler.timer(), None);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_configure_always_replaces_timer() {
        let mut timers = TimerManager::new();
        let mut scheduler = AutoplayScheduler::default();

        scheduler.configure(&mut timers, ms(0), true, ms(1000));
        let first = scheduler.timer();
        assert!(first.is_some());

        scheduler.configure(&mut timers, ms(600), true, ms(1000));
        let second = scheduler.timer();
        assert_ne!(first, second);
        assert_eq!(timers.active_count(), 1);

        // The fresh window starts at 600ms.
        assert!(timers.process_expired(ms(1000)).is_empty());
        assert_eq!(timers.process_expired(ms(1600)), vec![second.unwrap()]);
    }

    #[test]
    fn test_disable_cancels() {
        let mut timers = TimerManager::new();
        let mut scheduler = AutoplayScheduler::default();
        scheduler.configure(&mut timers, ms(0), true, ms(1000));
        scheduler.configure(&mut timers, ms(10), false, ms(1000));
        assert_eq!(scheduler.timer(), None);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_owns_timer() {
        let mut timers = TimerManager::new();
        let other = timers.start_one_shot(ms(0), ms(10));
        let mut scheduler = AutoplayScheduler::default();
        scheduler.configure(&mut timers, ms(0), true, ms(1000));

        assert!(scheduler.owns_timer(scheduler.timer().unwrap()));
        assert!(!scheduler.owns_timer(other));
    }

    #[test]
    fn test_tick_actions() {
        let scheduler = AutoplayScheduler::default();

        let mut model = PageIndexModel::new(3, false);
        assert_eq!(scheduler.tick_action(&model), AutoplayAction::Advance);
        model.set_current(2);
        assert_eq!(scheduler.tick_action(&model), AutoplayAction::ResetToFirst);
        model.set_circular(true);
        assert_eq!(scheduler.tick_action(&model), AutoplayAction::Advance);

        let single = PageIndexModel::new(1, true);
        assert_eq!(scheduler.tick_action(&single), AutoplayAction::Skip);
    }
}
