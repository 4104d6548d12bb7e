//! Drag gesture state machine.
//!
//! [`GestureInputHandler`] turns a stream of single-finger [`DragSample`]s
//! into live drag frames and, on release, a [`DragDecision`]. It never
//! touches animated values itself: the controller applies its output, which
//! keeps the thresholds testable without an input system.
//!
//! # Usage
//!
//! ```
//! use horizon_swiper::gesture::{
//!     DragContext, DragDecision, DragSample, GestureInputHandler, GestureOutput,
//! };
//! use horizon_swiper::GestureConfig;
//!
//! let mut handler = GestureInputHandler::new(GestureConfig::default(), false);
//! let context = DragContext::new(300.0, true, true);
//!
//! handler.handle(&DragSample::started(1), context);
//! handler.handle(&DragSample::moved(1, -80.0, 0.0), context);
//! let output = handler.handle(&DragSample::ended(1, -80.0, 0.0, -100.0, 0.0), context);
//! assert!(matches!(output, GestureOutput::Released(DragDecision::CommitForward { .. })));
//! ```

use crate::config::GestureConfig;
use crate::index::Slot;

/// Default fraction of the viewport extent a drag must cover to commit.
pub const DEFAULT_COMMIT_FRACTION: f32 = 0.25;

/// Default release speed, in units per second, above which any drag in a
/// direction commits.
pub const DEFAULT_FLICK_VELOCITY: f32 = 500.0;

/// Default distance a horizontal drag must travel before it takes over.
pub const DEFAULT_ACTIVATION_OFFSET_HORIZONTAL: f32 = 20.0;

/// Default distance a vertical drag must travel before it takes over.
pub const DEFAULT_ACTIVATION_OFFSET_VERTICAL: f32 = 2.0;

/// Default release speed at which the settle duration is shortest.
pub const DEFAULT_VELOCITY_REFERENCE: f32 = 2000.0;

/// Phase of a touch sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The finger touched down.
    Started,
    /// The finger moved.
    Moved,
    /// The finger lifted.
    Ended,
    /// The system took the touch away.
    Cancelled,
}

/// One input sample of a drag.
///
/// Translation is measured from the touch-down point; velocity is the
/// instantaneous pointer velocity in units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Identifier of the finger producing the sample.
    pub pointer_id: u64,
    /// Touch phase.
    pub phase: TouchPhase,
    /// Translation since touch-down, `(x, y)`.
    pub translation: (f32, f32),
    /// Instantaneous velocity, `(x, y)`.
    pub velocity: (f32, f32),
}

impl DragSample {
    /// A touch-down sample.
    pub fn started(pointer_id: u64) -> Self {
        Self {
            pointer_id,
            phase: TouchPhase::Started,
            translation: (0.0, 0.0),
            velocity: (0.0, 0.0),
        }
    }

    /// A move sample.
    pub fn moved(pointer_id: u64, dx: f32, dy: f32) -> Self {
        Self {
            pointer_id,
            phase: TouchPhase::Moved,
            translation: (dx, dy),
            velocity: (0.0, 0.0),
        }
    }

    /// A lift sample with the release velocity.
    pub fn ended(pointer_id: u64, dx: f32, dy: f32, vx: f32, vy: f32) -> Self {
        Self {
            pointer_id,
            phase: TouchPhase::Ended,
            translation: (dx, dy),
            velocity: (vx, vy),
        }
    }

    /// A cancellation sample.
    pub fn cancelled(pointer_id: u64) -> Self {
        Self {
            pointer_id,
            phase: TouchPhase::Cancelled,
            translation: (0.0, 0.0),
            velocity: (0.0, 0.0),
        }
    }

    fn along(&self, vertical: bool) -> (f32, f32) {
        if vertical {
            (self.translation.1, self.velocity.1)
        } else {
            (self.translation.0, self.velocity.0)
        }
    }
}

/// What the drag can reach, captured when the drag takes over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragContext {
    /// Viewport extent along the paging axis.
    pub extent: f32,
    /// Whether a page exists before the current one.
    pub has_before: bool,
    /// Whether a page exists after the current one.
    pub has_after: bool,
}

impl DragContext {
    /// Create a drag context.
    pub fn new(extent: f32, has_before: bool, has_after: bool) -> Self {
        Self {
            extent,
            has_before,
            has_after,
        }
    }
}

/// Live positions for one drag sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    /// Clamped displacement along the paging axis.
    pub delta: f32,
    /// Viewport extent along the paging axis.
    pub extent: f32,
}

impl DragFrame {
    /// Offset of the page in `slot` for this frame.
    #[inline]
    pub fn offset(&self, slot: Slot) -> f32 {
        self.delta + slot.idle_offset(self.extent)
    }

    /// How far the drag has travelled, as a fraction of the extent.
    pub fn progress(&self) -> f32 {
        if self.extent > 0.0 {
            (self.delta.abs() / self.extent).min(1.0)
        } else {
            0.0
        }
    }
}

/// Outcome of a released drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragDecision {
    /// Move to the page after the current one.
    CommitForward {
        /// Release velocity along the paging axis.
        velocity: f32,
    },
    /// Move to the page before the current one.
    CommitBackward {
        /// Release velocity along the paging axis.
        velocity: f32,
    },
    /// Return to the current page.
    Reject,
}

/// What the controller should do with a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutput {
    /// Nothing to apply (secondary finger, tap, pre-activation movement).
    Ignored,
    /// The drag just took over; stop animations, then apply the frame.
    Began(DragFrame),
    /// Apply the frame to the live positions.
    Moved(DragFrame),
    /// The drag is over.
    Released(DragDecision),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Pending { pointer_id: u64 },
    Active { pointer_id: u64, context: DragContext },
}

/// Single-finger drag state machine.
#[derive(Debug, Clone)]
pub struct GestureInputHandler {
    config: GestureConfig,
    vertical: bool,
    state: DragState,
}

impl GestureInputHandler {
    /// Create a handler for the given axis.
    pub fn new(config: GestureConfig, vertical: bool) -> Self {
        Self {
            config,
            vertical,
            state: DragState::Idle,
        }
    }

    /// Replace tuning and axis. A drag in progress is abandoned.
    pub fn configure(&mut self, config: GestureConfig, vertical: bool) {
        self.config = config;
        self.vertical = vertical;
        self.state = DragState::Idle;
    }

    /// Whether a drag currently owns the live positions.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Active { .. })
    }

    /// Whether a finger is down, active or not.
    pub fn is_tracking(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Forget the current touch. Returns whether a drag was active.
    pub fn reset(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }

    fn activation_offset(&self) -> f32 {
        if self.vertical {
            self.config.activation_offset_vertical
        } else {
            self.config.activation_offset_horizontal
        }
    }

    /// Process one sample.
    ///
    /// `context` describes the current page's neighbourhood; it is captured
    /// when the drag takes over and ignored afterwards.
    pub fn handle(&mut self, sample: &DragSample, context: DragContext) -> GestureOutput {
        let (moved, velocity) = sample.along(self.vertical);

        match (self.state, sample.phase) {
            (DragState::Idle, TouchPhase::Started) => {
                self.state = DragState::Pending {
                    pointer_id: sample.pointer_id,
                };
                GestureOutput::Ignored
            }
            (DragState::Idle, _) => GestureOutput::Ignored,

            (DragState::Pending { pointer_id }, _) | (DragState::Active { pointer_id, .. }, _)
                if pointer_id != sample.pointer_id =>
            {
                tracing::trace!(
                    target: "horizon_swiper::gesture",
                    pointer = sample.pointer_id,
                    "ignoring secondary touch"
                );
                GestureOutput::Ignored
            }

            (DragState::Pending { .. }, TouchPhase::Started) => GestureOutput::Ignored,
            (DragState::Pending { pointer_id }, TouchPhase::Moved) => {
                if moved.abs() <= self.activation_offset() {
                    return GestureOutput::Ignored;
                }
                self.state = DragState::Active {
                    pointer_id,
                    context,
                };
                tracing::debug!(
                    target: "horizon_swiper::gesture",
                    extent = context.extent,
                    "drag activated"
                );
                GestureOutput::Began(self.frame(moved, context))
            }
            (DragState::Pending { .. }, TouchPhase::Ended | TouchPhase::Cancelled) => {
                self.state = DragState::Idle;
                GestureOutput::Ignored
            }

            (DragState::Active { context, .. }, TouchPhase::Started | TouchPhase::Moved) => {
                let frame = self.frame(moved, context);
                tracing::trace!(target: "horizon_swiper::gesture", delta = frame.delta, "drag sample");
                GestureOutput::Moved(frame)
            }
            (DragState::Active { context, .. }, TouchPhase::Ended) => {
                self.state = DragState::Idle;
                let frame = self.frame(moved, context);
                let decision = self.decide(frame.delta, velocity, context);
                tracing::debug!(
                    target: "horizon_swiper::gesture",
                    moved = frame.delta,
                    velocity,
                    ?decision,
                    "drag released"
                );
                GestureOutput::Released(decision)
            }
            (DragState::Active { .. }, TouchPhase::Cancelled) => {
                self.state = DragState::Idle;
                tracing::debug!(target: "horizon_swiper::gesture", "drag cancelled");
                GestureOutput::Released(DragDecision::Reject)
            }
        }
    }

    fn frame(&self, moved: f32, context: DragContext) -> DragFrame {
        let blocked = (moved < 0.0 && !context.has_after) || (moved > 0.0 && !context.has_before);
        DragFrame {
            delta: if blocked || !moved.is_finite() { 0.0 } else { moved },
            extent: context.extent,
        }
    }

    /// Decide the fate of a drag that ended at `moved` with `velocity`.
    pub fn decide(&self, moved: f32, velocity: f32, context: DragContext) -> DragDecision {
        let threshold = context.extent * self.config.commit_fraction;
        let flick = velocity.abs() > self.config.flick_velocity;

        if context.has_after && (moved < -threshold || (moved < 0.0 && flick)) {
            DragDecision::CommitForward { velocity }
        } else if context.has_before && (moved > threshold || (moved > 0.0 && flick)) {
            DragDecision::CommitBackward { velocity }
        } else {
            DragDecision::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: DragContext = DragContext {
        extent: 300.0,
        has_before: true,
        has_after: true,
    };

    fn handler() -> GestureInputHandler {
        GestureInputHandler::new(GestureConfig::default(), false)
    }

    fn release(handler: &mut GestureInputHandler, moved: f32, velocity: f32) -> GestureOutput {
        handler.handle(&DragSample::started(1), BOTH);
        handler.handle(&DragSample::moved(1, moved, 0.0), BOTH);
        handler.handle(&DragSample::ended(1, moved, 0.0, velocity, 0.0), BOTH)
    }

    #[test]
    fn test_distance_commits_forward() {
        let output = release(&mut handler(), -80.0, 0.0);
        assert_eq!(
            output,
            GestureOutput::Released(DragDecision::CommitForward { velocity: 0.0 })
        );
    }

    #[test]
    fn test_flick_commits_forward() {
        let output = release(&mut handler(), -50.0, -600.0);
        assert_eq!(
            output,
            GestureOutput::Released(DragDecision::CommitForward { velocity: -600.0 })
        );
    }

    #[test]
    fn test_short_slow_drag_rejects() {
        let output = release(&mut handler(), -50.0, -100.0);
        assert_eq!(output, GestureOutput::Released(DragDecision::Reject));
    }

    #[test]
    fn test_backward_is_mirrored() {
        let output = release(&mut handler(), 80.0, 0.0);
        assert_eq!(
            output,
            GestureOutput::Released(DragDecision::CommitBackward { velocity: 0.0 })
        );
    }

    #[test]
    fn test_commit_requires_neighbor() {
        let handler = handler();
        let first_page = DragContext::new(300.0, false, true);
        assert_eq!(handler.decide(120.0, 900.0, first_page), DragDecision::Reject);

        let last_page = DragContext::new(300.0, true, false);
        assert_eq!(handler.decide(-120.0, -900.0, last_page), DragDecision::Reject);
    }

    #[test]
    fn test_drag_towards_missing_neighbor_is_clamped() {
        let mut handler = handler();
        let first_page = DragContext::new(300.0, false, true);

        handler.handle(&DragSample::started(1), first_page);
        match handler.handle(&DragSample::moved(1, 60.0, 0.0), first_page) {
            GestureOutput::Began(frame) => {
                assert_eq!(frame.delta, 0.0);
                assert_eq!(frame.offset(Slot::Current), 0.0);
                assert_eq!(frame.offset(Slot::After), 300.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_activation_offset() {
        let mut handler = handler();
        handler.handle(&DragSample::started(1), BOTH);

        assert_eq!(
            handler.handle(&DragSample::moved(1, -15.0, 0.0), BOTH),
            GestureOutput::Ignored
        );
        assert!(!handler.is_dragging());

        match handler.handle(&DragSample::moved(1, -25.0, 0.0), BOTH) {
            GestureOutput::Began(frame) => {
                assert_eq!(frame.delta, -25.0);
                assert_eq!(frame.offset(Slot::Before), -325.0);
                assert_eq!(frame.offset(Slot::After), 275.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(handler.is_dragging());
    }

    #[test]
    fn test_vertical_uses_y_axis() {
        let mut handler = GestureInputHandler::new(GestureConfig::default(), true);
        handler.handle(&DragSample::started(1), BOTH);
        assert!(matches!(
            handler.handle(&DragSample::moved(1, 100.0, -3.0), BOTH),
            GestureOutput::Began(DragFrame { delta: -3.0, .. })
        ));
    }

    #[test]
    fn test_tap_changes_nothing() {
        let mut handler = handler();
        handler.handle(&DragSample::started(1), BOTH);
        assert_eq!(
            handler.handle(&DragSample::ended(1, 4.0, 0.0, 900.0, 0.0), BOTH),
            GestureOutput::Ignored
        );
        assert!(!handler.is_tracking());
    }

    #[test]
    fn test_cancel_rejects() {
        let mut handler = handler();
        handler.handle(&DragSample::started(1), BOTH);
        handler.handle(&DragSample::moved(1, -200.0, 0.0), BOTH);
        assert_eq!(
            handler.handle(&DragSample::cancelled(1), BOTH),
            GestureOutput::Released(DragDecision::Reject)
        );
    }

    #[test]
    fn test_secondary_finger_is_ignored() {
        let mut handler = handler();
        handler.handle(&DragSample::started(1), BOTH);
        handler.handle(&DragSample::moved(1, -40.0, 0.0), BOTH);

        assert_eq!(
            handler.handle(&DragSample::started(2), BOTH),
            GestureOutput::Ignored
        );
        assert_eq!(
            handler.handle(&DragSample::ended(2, -200.0, 0.0, -900.0, 0.0), BOTH),
            GestureOutput::Ignored
        );
        assert!(handler.is_dragging());
    }

    #[test]
    fn test_no_samples_after_release() {
        let mut handler = handler();
        release(&mut handler, -80.0, 0.0);
        assert_eq!(
            handler.handle(&DragSample::moved(1, -120.0, 0.0), BOTH),
            GestureOutput::Ignored
        );
    }

    #[test]
    fn test_context_is_captured_at_activation() {
        let mut handler = handler();
        handler.handle(&DragSample::started(1), BOTH);
        handler.handle(&DragSample::moved(1, -40.0, 0.0), BOTH);

        let narrowed = DragContext::new(100.0, false, false);
        assert_eq!(
            handler.handle(&DragSample::moved(1, -60.0, 0.0), narrowed),
            GestureOutput::Moved(DragFrame {
                delta: -60.0,
                extent: 300.0
            })
        );
    }
}
