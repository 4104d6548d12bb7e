//! Transition bookkeeping types.
//!
//! These describe what the engine is doing with its animated positions at
//! any moment and how long a committed settle should take.

use std::fmt;
use std::time::Duration;

/// Who currently owns the animated positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    /// All positions rest at their idle values.
    #[default]
    Idle,
    /// A drag gesture writes positions on every input sample.
    Dragging,
    /// A timed transition interpolates positions towards committed targets.
    Animating,
}

impl TransitionState {
    /// Check if the positions are in motion (dragged or animated).
    pub fn is_busy(&self) -> bool {
        !matches!(self, TransitionState::Idle)
    }
}

/// What a transition does, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Move to the page after the current one.
    Forward,
    /// Move to the page before the current one.
    Backward,
    /// Jump directly to an arbitrary page.
    Jump,
    /// Return dragged positions to rest without changing page.
    SnapBack,
}

/// Identifies one started transition.
///
/// Ids increase monotonically, so a stale id can never match a later
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(pub(crate) u64);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition#{}", self.0)
    }
}

/// Settle duration for a gesture-committed transition.
///
/// Faster releases settle faster: the base duration shrinks linearly with
/// `|velocity|` and bottoms out at two thirds of `base` once `|velocity|`
/// reaches `reference`.
///
/// ```
/// use std::time::Duration;
/// use horizon_swiper::animation::settle_duration;
///
/// let base = Duration::from_millis(300);
/// assert_eq!(settle_duration(base, 0.0, 2000.0), base);
/// assert_eq!(settle_duration(base, -4000.0, 2000.0), Duration::from_millis(200));
/// ```
pub fn settle_duration(base: Duration, velocity: f32, reference: f32) -> Duration {
    if !velocity.is_finite() || reference <= 0.0 {
        return base;
    }
    let scale = f64::from((velocity.abs() / reference).min(1.0));
    let cut = (base.as_nanos() as f64 * scale / 3.0).round() as u64;
    base.saturating_sub(Duration::from_nanos(cut))
}
