//! Dot-indicator notification.
//!
//! The engine never owns an indicator. It pushes `{count, current}` to an
//! optional [`DotIndicator`] through [`IndicatorBridge`], which only calls
//! through when a value actually changed.

use std::sync::Arc;

use parking_lot::Mutex;

/// Receiver of page count and current page updates.
pub trait DotIndicator {
    /// The number of pages changed.
    fn set_count(&mut self, count: usize);

    /// The current page changed.
    fn set_current(&mut self, index: usize);
}

/// Shared indicators let the host keep a handle for rendering.
impl<T: DotIndicator> DotIndicator for Arc<Mutex<T>> {
    fn set_count(&mut self, count: usize) {
        self.lock().set_count(count);
    }

    fn set_current(&mut self, index: usize) {
        self.lock().set_current(index);
    }
}

/// A ready-made indicator model: remembers what it was told.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotIndicatorState {
    count: usize,
    current: usize,
}

impl DotIndicatorState {
    /// Create an empty indicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dots.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Index of the highlighted dot.
    pub fn current(&self) -> usize {
        self.current
    }

    /// One flag per dot, `true` for the highlighted one.
    pub fn dots(&self) -> Vec<bool> {
        (0..self.count).map(|i| i == self.current).collect()
    }
}

impl DotIndicator for DotIndicatorState {
    fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    fn set_current(&mut self, index: usize) {
        self.current = index;
    }
}

/// Forwards changes to an optional indicator.
#[derive(Default)]
pub struct IndicatorBridge {
    indicator: Option<Box<dyn DotIndicator + Send>>,
    enabled: bool,
    last: Option<(usize, usize)>,
}

impl std::fmt::Debug for IndicatorBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorBridge")
            .field("attached", &self.indicator.is_some())
            .field("enabled", &self.enabled)
            .field("last", &self.last)
            .finish()
    }
}

impl IndicatorBridge {
    /// Create a bridge with no indicator attached.
    pub fn new(enabled: bool) -> Self {
        Self {
            indicator: None,
            enabled,
            last: None,
        }
    }

    /// Attach an indicator, replacing any previous one.
    pub fn attach(&mut self, indicator: impl DotIndicator + Send + 'static) {
        self.indicator = Some(Box::new(indicator));
        self.last = None;
    }

    /// Detach the indicator.
    pub fn detach(&mut self) {
        self.indicator = None;
        self.last = None;
    }

    /// Whether an indicator is attached.
    pub fn is_attached(&self) -> bool {
        self.indicator.is_some()
    }

    /// Enable or disable notifications. Re-enabling resends the next update.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled != self.enabled {
            self.enabled = enabled;
            self.last = None;
        }
    }

    /// Whether notifications are enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Report the current state; only changed values are forwarded.
    pub fn notify(&mut self, count: usize, current: usize) {
        if !self.enabled {
            return;
        }
        let Some(indicator) = self.indicator.as_mut() else {
            return;
        };
        let previous = self.last.replace((count, current));
        if previous.map(|(c, _)| c) != Some(count) {
            indicator.set_count(count);
        }
        if previous.map(|(_, i)| i) != Some(current) {
            indicator.set_current(current);
        }
        if previous != Some((count, current)) {
            tracing::trace!(target: "horizon_swiper::indicator", count, current, "indicator updated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl DotIndicator for Recorder {
        fn set_count(&mut self, count: usize) {
            self.calls.push(format!("count {count}"));
        }

        fn set_current(&mut self, index: usize) {
            self.calls.push(format!("current {index}"));
        }
    }

    #[test]
    fn test_only_changes_are_forwarded() {
        let recorder = Arc::new(Mutex::new(Recorder::default()));
        let mut bridge = IndicatorBridge::new(true);
        bridge.attach(recorder.clone());

        bridge.notify(3, 0);
        bridge.notify(3, 0);
        bridge.notify(3, 1);
        bridge.notify(4, 1);

        assert_eq!(
            recorder.lock().calls,
            vec!["count 3", "current 0", "current 1", "count 4"]
        );
    }

    #[test]
    fn test_disabled_bridge_is_silent() {
        let state = Arc::new(Mutex::new(DotIndicatorState::new()));
        let mut bridge = IndicatorBridge::new(false);
        bridge.attach(state.clone());

        bridge.notify(5, 2);
        assert_eq!(state.lock().count(), 0);

        bridge.set_enabled(true);
        bridge.notify(5, 2);
        assert_eq!(state.lock().dots(), vec![false, false, true, false, false]);
    }

    #[test]
    fn test_without_indicator() {
        let mut bridge = IndicatorBridge::new(true);
        bridge.notify(2, 1);
        assert!(!bridge.is_attached());
    }

    #[test]
    fn test_empty_page_set_reports_zero() {
        let state = Arc::new(Mutex::new(DotIndicatorState::new()));
        let mut bridge = IndicatorBridge::new(true);
        bridge.attach(state.clone());
        bridge.notify(0, 0);
        assert_eq!(state.lock().count(), 0);
        assert!(state.lock().dots().is_empty());
    }
}
