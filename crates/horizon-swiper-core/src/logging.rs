//! Logging facilities for Horizon Swiper.
//!
//! Horizon Swiper uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_swiper=debug")
//!         .init();
//! }
//! ```
//!
//! Every subsystem logs under one of the [`targets`] so hosts can filter a
//! noisy area (per-sample gesture tracing, for instance) without losing the
//! rest.

/// Span names used throughout Horizon Swiper for tracing.
pub mod span_names {
    /// Frame tick processing span.
    pub const TICK: &str = "horizon_swiper::tick";
    /// Timer processing span.
    pub const TIMER: &str = "horizon_swiper::timer";
    /// Signal emission span.
    pub const SIGNAL: &str = "horizon_swiper::signal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core services target.
    pub const CORE: &str = "horizon_swiper_core";
    /// Timer system target.
    pub const TIMER: &str = "horizon_swiper_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_swiper_core::signal";
    /// Engine composition root target.
    pub const CONTROLLER: &str = "horizon_swiper::controller";
    /// Animated positions and transitions target.
    pub const ANIMATION: &str = "horizon_swiper::animation";
    /// Drag gesture state machine target.
    pub const GESTURE: &str = "horizon_swiper::gesture";
    /// Autoplay scheduling target.
    pub const AUTOPLAY: &str = "horizon_swiper::autoplay";
    /// Indicator notification target.
    pub const INDICATOR: &str = "horizon_swiper::indicator";
}

/// A scoped span for measuring an operation.
///
/// The span stays entered until the guard is dropped.
///
/// ```
/// use horizon_swiper_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("relayout");
///     // work being measured
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_swiper::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
