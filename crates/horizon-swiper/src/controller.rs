//! The swiper engine's composition root.
//!
//! [`SwiperController`] wires the page index model, the transition animator,
//! the drag state machine, the autoplay scheduler and the indicator bridge
//! into one unit. The host feeds it layout, page count, drag samples and
//! frame ticks, and reads back one [`ItemTransform`] per page.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_swiper::{SwiperConfig, SwiperController, SwiperHandle};
//!
//! let mut swiper = SwiperController::new(SwiperConfig::default().with_circular(true)).unwrap();
//! swiper.set_viewport(300.0, 200.0);
//! swiper.set_item_count(3);
//!
//! assert!(swiper.next_page());
//! assert_eq!(swiper.current_index(), 1);
//!
//! // Let the slide run to completion.
//! swiper.tick(Duration::from_millis(250));
//! assert_eq!(swiper.item_transform(1).unwrap().translate_x, 0.0);
//! assert_eq!(swiper.item_transform(0).unwrap().translate_x, -300.0);
//! ```

use std::time::Duration;

use horizon_swiper_core::{ConnectionId, FrameClock, PerfSpan, Signal, TimerManager};

use crate::animation::{
    AnimatedScalar, SlotBindings, SlotTarget, SlotTargets, TransitionAnimator, TransitionId,
    TransitionKind, TransitionState, TweenValue, settle_duration,
};
use crate::autoplay::{AutoplayAction, AutoplayScheduler};
use crate::config::SwiperConfig;
use crate::error::{Result, SwiperError};
use crate::gesture::{
    DragContext, DragDecision, DragFrame, DragSample, GestureInputHandler, GestureOutput,
};
use crate::indicator::{DotIndicator, IndicatorBridge};
use crate::index::{PageIndexModel, Slot};

/// Imperative navigation exposed to the host.
pub trait SwiperHandle {
    /// Page forward. Returns whether the page changed.
    fn next_page(&mut self) -> bool;

    /// Page backward. Returns whether the page changed.
    fn prev_page(&mut self) -> bool;

    /// Jump to `index`, or with `None` settle a partially dragged view back
    /// to rest.
    fn switch_page(&mut self, index: Option<usize>) -> Result<()>;
}

/// The wrapper transform the host applies to one page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemTransform {
    /// Horizontal offset from the viewport origin.
    pub translate_x: f32,
    /// Vertical offset from the viewport origin.
    pub translate_y: f32,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
}

/// Paged carousel engine.
pub struct SwiperController<V: AnimatedScalar = TweenValue> {
    config: SwiperConfig,
    model: PageIndexModel,
    animator: TransitionAnimator<V>,
    gesture: GestureInputHandler,
    autoplay: AutoplayScheduler,
    indicator: IndicatorBridge,
    clock: FrameClock,
    timers: TimerManager,
    viewport: (f32, f32),
    state: TransitionState,
    transition: Option<(TransitionId, TransitionKind)>,
    count_known: bool,
    pending_current: usize,
    ready: bool,
    disposed: bool,

    /// Emitted with the new index once per committed page change.
    pub page_changed: Signal<usize>,
}

impl<V: AnimatedScalar> std::fmt::Debug for SwiperController<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwiperController")
            .field("current", &self.model.current())
            .field("count", &self.model.count())
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field("ready", &self.ready)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl SwiperController {
    /// Create a controller with tweened values.
    pub fn new(config: SwiperConfig) -> Result<Self> {
        Self::from_config(config)
    }
}

impl<V: AnimatedScalar> SwiperController<V> {
    /// Create a controller driving any [`AnimatedScalar`] implementation.
    ///
    /// The configuration is validated first. Autoplay, when enabled, is armed
    /// immediately on the controller's timeline.
    pub fn from_config(config: SwiperConfig) -> Result<Self> {
        config.validate()?;

        let mut timers = TimerManager::new();
        let clock = FrameClock::new();
        let mut autoplay = AutoplayScheduler::new(config.autoplay, config.interval);
        autoplay.rearm(&mut timers, clock.now());

        Ok(Self {
            model: PageIndexModel::new(0, config.circular),
            animator: TransitionAnimator::new(),
            gesture: GestureInputHandler::new(config.gesture, config.vertical),
            autoplay,
            indicator: IndicatorBridge::new(config.indicator_dots),
            clock,
            timers,
            viewport: (0.0, 0.0),
            state: TransitionState::Idle,
            transition: None,
            count_known: false,
            pending_current: config.current,
            ready: false,
            disposed: false,
            page_changed: Signal::new(),
            config,
        })
    }

    /// Attach a dot indicator using builder pattern.
    pub fn with_indicator(mut self, indicator: impl DotIndicator + Send + 'static) -> Self {
        self.attach_indicator(indicator);
        self
    }

    /// Attach a dot indicator, replacing any previous one.
    pub fn attach_indicator(&mut self, indicator: impl DotIndicator + Send + 'static) {
        self.indicator.attach(indicator);
        if self.count_known {
            self.indicator.notify(self.model.count(), self.model.current());
        }
    }

    /// Detach the dot indicator.
    pub fn detach_indicator(&mut self) {
        self.indicator.detach();
    }

    /// Connect a page-change callback.
    pub fn on_page_change<F>(&self, callback: F) -> ConnectionId
    where
        F: Fn(&usize) + Send + Sync + 'static,
    {
        self.page_changed.connect(callback)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current configuration.
    pub fn config(&self) -> &SwiperConfig {
        &self.config
    }

    /// The current page.
    pub fn current_index(&self) -> usize {
        self.model.current()
    }

    /// The number of pages.
    pub fn item_count(&self) -> usize {
        self.model.count()
    }

    /// Who owns the animated positions right now.
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// What the running transition does, if one runs.
    pub fn active_transition(&self) -> Option<TransitionKind> {
        self.transition.map(|(_, kind)| kind)
    }

    /// Whether positions are allocated and dragging/animating is possible.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The engine's timeline position.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Viewport extent along the paging axis.
    pub fn extent(&self) -> f32 {
        if self.config.vertical {
            self.viewport.1
        } else {
            self.viewport.0
        }
    }

    /// The transform for page `index`, once positions are allocated.
    pub fn item_transform(&self, index: usize) -> Option<ItemTransform> {
        let offset = self.animator.offset(index)?;
        let opacity = self.animator.opacity(index)?;
        let (translate_x, translate_y) = if self.config.vertical {
            (0.0, offset)
        } else {
            (offset, 0.0)
        };
        Some(ItemTransform {
            translate_x,
            translate_y,
            opacity,
        })
    }

    /// Transforms for every page, in page order.
    pub fn item_transforms(&self) -> Vec<ItemTransform> {
        (0..self.animator.len())
            .filter_map(|index| self.item_transform(index))
            .collect()
    }

    // =========================================================================
    // Host input
    // =========================================================================

    /// Report the viewport size from the host's layout pass.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if self.disposed {
            tracing::warn!(target: "horizon_swiper::controller", "set_viewport on disposed controller");
            return;
        }
        let sanitize = |value: f32| if value.is_finite() && value > 0.0 { value } else { 0.0 };
        let viewport = (sanitize(width), sanitize(height));
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.rebuild(false);
    }

    /// Report the number of pages.
    pub fn set_item_count(&mut self, count: usize) {
        if self.disposed {
            tracing::warn!(target: "horizon_swiper::controller", "set_item_count on disposed controller");
            return;
        }
        let first = !self.count_known;
        if !first && count == self.model.count() {
            return;
        }
        self.count_known = true;
        self.model.set_count(count);
        if first && self.pending_current < count {
            self.model.set_current(self.pending_current);
        }
        tracing::debug!(
            target: "horizon_swiper::controller",
            count,
            current = self.model.current(),
            "item count changed"
        );
        self.rebuild(true);
        self.indicator.notify(count, self.model.current());
        self.autoplay.rearm(&mut self.timers, self.clock.now());
    }

    /// Apply a new configuration.
    ///
    /// Autoplay is always cancelled and re-armed. Changing the axis, the
    /// wrap mode or fading re-lays out every page at rest.
    pub fn set_config(&mut self, config: SwiperConfig) -> Result<()> {
        if self.disposed {
            return Err(SwiperError::Disposed);
        }
        config.validate()?;
        let current_changed = config.current != self.config.current;
        if current_changed && self.count_known && config.current >= self.model.count() {
            return Err(SwiperError::PageOutOfRange {
                index: config.current,
                count: self.model.count(),
            });
        }

        let previous = std::mem::replace(&mut self.config, config);
        let config = &self.config;

        let relayout = previous.vertical != config.vertical
            || previous.circular != config.circular
            || previous.fade_in != config.fade_in;

        let mut dropped_drag = false;
        if previous.gesture != config.gesture || previous.vertical != config.vertical {
            dropped_drag = self.gesture.reset();
            self.gesture.configure(config.gesture, config.vertical);
        }
        self.model.set_circular(config.circular);
        if previous.indicator_dots != config.indicator_dots {
            self.indicator.set_enabled(config.indicator_dots);
            if self.count_known {
                self.indicator.notify(self.model.count(), self.model.current());
            }
        }

        if relayout {
            self.rebuild(false);
        } else if dropped_drag || (config.disable_touch && self.gesture.reset()) {
            self.snap_back();
        }

        self.autoplay.configure(
            &mut self.timers,
            self.clock.now(),
            self.config.autoplay,
            self.config.interval,
        );

        if current_changed {
            self.set_current(self.config.current)?;
        }
        tracing::debug!(target: "horizon_swiper::controller", "configuration applied");
        Ok(())
    }

    /// Host-driven index change; animates like [`switch_page`](SwiperHandle::switch_page).
    ///
    /// Before the page count is known the index is remembered and applied
    /// once it is.
    pub fn set_current(&mut self, index: usize) -> Result<()> {
        if self.disposed {
            return Err(SwiperError::Disposed);
        }
        if !self.count_known {
            self.pending_current = index;
            return Ok(());
        }
        if index == self.model.current() {
            return Ok(());
        }
        self.switch_page(Some(index))
    }

    /// Feed one drag sample.
    ///
    /// Ignored while touch is disabled, before positions are allocated, and
    /// after disposal.
    pub fn handle_drag(&mut self, sample: &DragSample) {
        if self.disposed || self.config.disable_touch || !self.ready {
            return;
        }
        let context = DragContext::new(
            self.extent(),
            self.model.can_retreat(),
            self.model.can_advance(),
        );
        match self.gesture.handle(sample, context) {
            GestureOutput::Ignored => {}
            GestureOutput::Began(frame) => {
                self.autoplay.cancel(&mut self.timers);
                let bindings = self.bindings_for(frame.delta);
                self.animator.prepare_slots(bindings);
                self.animator.interrupt();
                self.transition = None;
                self.state = TransitionState::Dragging;
                self.apply_frame(frame);
            }
            GestureOutput::Moved(frame) => self.apply_frame(frame),
            GestureOutput::Released(decision) => {
                let moved = match decision {
                    DragDecision::CommitForward { velocity } => {
                        self.navigate(true, Some(velocity))
                    }
                    DragDecision::CommitBackward { velocity } => {
                        self.navigate(false, Some(velocity))
                    }
                    DragDecision::Reject => false,
                };
                if !moved {
                    self.snap_back();
                }
                self.autoplay.rearm(&mut self.timers, self.clock.now());
            }
        }
    }

    /// Advance the engine by one frame.
    ///
    /// Steps running transitions, then fires due autoplay ticks.
    #[tracing::instrument(target = "horizon_swiper::controller", level = "trace", skip(self))]
    pub fn tick(&mut self, dt: Duration) {
        if self.disposed {
            return;
        }
        let now = self.clock.advance(dt);

        if let Some(finished) = self.animator.step(now)
            && let Some((id, kind)) = self.transition
            && id == finished
        {
            self.transition = None;
            self.state = TransitionState::Idle;
            self.park_neighbours();
            tracing::debug!(target: "horizon_swiper::controller", ?kind, "transition settled");
        }

        for id in self.timers.process_expired(now) {
            if self.disposed || !self.autoplay.owns_timer(id) {
                continue;
            }
            self.autoplay_tick();
        }
    }

    /// Tear the controller down.
    ///
    /// Cancels autoplay, stops animations and disconnects every page-change
    /// callback. Later calls are no-ops (or `Disposed` errors).
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.autoplay.cancel(&mut self.timers);
        self.animator.stop();
        self.gesture.reset();
        self.transition = None;
        self.state = TransitionState::Idle;
        self.page_changed.disconnect_all();
        tracing::debug!(target: "horizon_swiper::controller", "disposed");
    }

    /// Page forward; faster `velocity` settles faster.
    pub fn next_page_with_velocity(&mut self, velocity: f32) -> bool {
        self.navigate(true, Some(velocity))
    }

    /// Page backward; faster `velocity` settles faster.
    pub fn prev_page_with_velocity(&mut self, velocity: f32) -> bool {
        self.navigate(false, Some(velocity))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn rebuild(&mut self, reallocate: bool) {
        let extent = self.extent();
        if extent <= 0.0 || !self.count_known {
            self.ready = false;
            return;
        }
        let _span = PerfSpan::new("rebuild");
        if self.gesture.reset() {
            self.autoplay.rearm(&mut self.timers, self.clock.now());
        }
        if reallocate || !self.ready || self.animator.len() != self.model.count() {
            self.animator.allocate(&self.model, extent, self.config.fade_in);
        } else {
            self.animator.relayout(&self.model, extent, self.config.fade_in);
        }
        self.ready = true;
        self.transition = None;
        self.state = TransitionState::Idle;
    }

    /// Current-page neighbourhood, with a shared neighbour (two pages,
    /// circular) placed on the side `lean` points to.
    fn bindings_for(&self, lean: f32) -> SlotBindings {
        let mut bindings = SlotBindings::around(&self.model);
        let before = self.model.neighbor(Slot::Before);
        if before.is_some() && before == bindings.after && lean > 0.0 {
            bindings.before = before;
            bindings.after = None;
        }
        bindings
    }

    /// Lean towards the side the neighbourhood currently rests on.
    ///
    /// A shared neighbour (two pages, circular) keeps the side it sits on;
    /// otherwise the current page's displacement decides.
    fn resting_lean(&self) -> f32 {
        let after = self.model.neighbor(Slot::After);
        if let Some(shared) = after.filter(|_| self.model.neighbor(Slot::Before) == after) {
            let offset = self.animator.offset(shared).unwrap_or(0.0);
            if offset != 0.0 {
                return -offset;
            }
        }
        self.animator.offset(self.model.current()).unwrap_or(0.0)
    }

    /// Place the current page's neighbours exactly at their idle offsets.
    fn park_neighbours(&mut self) {
        if !self.ready {
            return;
        }
        let extent = self.extent();
        let around = self.bindings_for(self.resting_lean());
        self.animator.prepare_slots(SlotBindings {
            before: around.before,
            current: None,
            after: around.after,
        });
        for slot in [Slot::Before, Slot::After] {
            self.animator.snap_to(slot, slot.idle_offset(extent));
            if self.config.fade_in {
                self.animator.snap_opacity(slot, 0.0);
            }
        }
    }

    fn target(&self, offset: f32, opacity: f32) -> SlotTarget {
        if self.config.fade_in {
            SlotTarget::with_opacity(offset, opacity)
        } else {
            SlotTarget::offset(offset)
        }
    }

    fn apply_frame(&mut self, frame: DragFrame) {
        let bindings = self.bindings_for(frame.delta);
        self.animator.prepare_slots(bindings);
        let progress = frame.progress();
        for slot in Slot::ALL {
            self.animator.snap_to(slot, frame.offset(slot));
            if self.config.fade_in {
                let opacity = if slot == Slot::Current {
                    1.0 - progress
                } else {
                    progress
                };
                self.animator.snap_opacity(slot, opacity);
            }
        }
    }

    fn begin(&mut self, id: Option<TransitionId>, kind: TransitionKind) {
        match id {
            Some(id) => {
                self.transition = Some((id, kind));
                self.state = TransitionState::Animating;
            }
            None => {
                self.transition = None;
                self.state = TransitionState::Idle;
            }
        }
    }

    /// Abandon a live drag that a programmatic transition supersedes.
    fn supersede_drag(&mut self) {
        if self.gesture.reset() {
            tracing::debug!(target: "horizon_swiper::controller", "drag superseded");
            self.autoplay.rearm(&mut self.timers, self.clock.now());
        }
    }

    /// Move one page. Returns whether the page changed.
    fn navigate(&mut self, forward: bool, velocity: Option<f32>) -> bool {
        if self.disposed {
            tracing::warn!(target: "horizon_swiper::controller", "navigation on disposed controller");
            return false;
        }
        let slot = if forward { Slot::After } else { Slot::Before };
        let Some(incoming) = self.model.neighbor(slot) else {
            return false;
        };
        let outgoing = self.model.current();
        let from_drag = self.state == TransitionState::Dragging;
        self.supersede_drag();

        self.model.set_current(incoming);
        tracing::debug!(
            target: "horizon_swiper::controller",
            from = outgoing,
            to = incoming,
            forward,
            from_drag,
            "page committed"
        );
        self.indicator.notify(self.model.count(), incoming);

        if self.ready {
            let extent = self.extent();
            let sign = if forward { 1.0 } else { -1.0 };
            let (out_slot, far_slot) = if forward {
                (Slot::Before, Slot::After)
            } else {
                (Slot::After, Slot::Before)
            };
            let far = self
                .model
                .neighbor(far_slot)
                .filter(|&page| page != outgoing && page != incoming);

            let mut bindings = SlotBindings::default();
            bindings.set(out_slot, Some(outgoing));
            bindings.set(Slot::Current, Some(incoming));
            bindings.set(far_slot, far);
            self.animator.prepare_slots(bindings);

            if !from_drag {
                self.animator.snap_to(Slot::Current, sign * extent);
                if self.config.fade_in {
                    self.animator.snap_opacity(Slot::Current, 0.0);
                }
            }
            self.animator.snap_to(far_slot, sign * extent);
            if self.config.fade_in {
                self.animator.snap_opacity(far_slot, 0.0);
            }

            let duration = match velocity {
                Some(velocity) => settle_duration(
                    self.config.duration,
                    velocity,
                    self.config.gesture.velocity_reference,
                ),
                None => self.config.duration,
            };
            let targets = SlotTargets::new()
                .with(out_slot, self.target(-sign * extent, 0.0))
                .with(Slot::Current, self.target(0.0, 1.0));
            let id = self
                .animator
                .animate_to(targets, duration, self.config.easing, self.clock.now());
            let kind = if forward {
                TransitionKind::Forward
            } else {
                TransitionKind::Backward
            };
            self.begin(id, kind);
        }

        self.page_changed.emit(incoming);
        true
    }

    fn jump(&mut self, index: usize) {
        let outgoing = self.model.current();
        // An adjacent page (wrapping included) slides in from its own side.
        let forward = if self.model.neighbor(Slot::After) == Some(index) {
            true
        } else if self.model.neighbor(Slot::Before) == Some(index) {
            false
        } else {
            index > outgoing
        };
        self.supersede_drag();
        self.model.set_current(index);
        tracing::debug!(target: "horizon_swiper::controller", from = outgoing, to = index, "page jump");

        if self.ready {
            let extent = self.extent();
            let sign = if forward { 1.0 } else { -1.0 };
            let (out_slot, far_slot) = if forward {
                (Slot::Before, Slot::After)
            } else {
                (Slot::After, Slot::Before)
            };
            let far = self
                .model
                .neighbor(far_slot)
                .filter(|&page| page != outgoing && page != index);
            let near = self
                .model
                .neighbor(out_slot)
                .filter(|&page| page != outgoing && Some(page) != far);

            // The new page's other neighbour parks on the outgoing side.
            if let Some(near) = near {
                self.animator.prepare_slots(SlotBindings {
                    before: None,
                    current: Some(near),
                    after: None,
                });
                self.animator.snap_to(Slot::Current, -sign * extent);
                if self.config.fade_in {
                    self.animator.snap_opacity(Slot::Current, 0.0);
                }
            }

            let mut bindings = SlotBindings::default();
            bindings.set(out_slot, Some(outgoing));
            bindings.set(Slot::Current, Some(index));
            bindings.set(far_slot, far);
            self.animator.prepare_slots(bindings);

            self.animator.snap_to(Slot::Current, sign * extent);
            self.animator
                .snap_opacity(Slot::Current, if self.config.fade_in { 0.0 } else { 1.0 });
            self.animator.snap_to(far_slot, sign * extent);
            if self.config.fade_in {
                self.animator.snap_opacity(far_slot, 0.0);
            }

            let targets = SlotTargets::new()
                .with(out_slot, self.target(-sign * extent, 0.0))
                .with(Slot::Current, self.target(0.0, 1.0));
            let id = self.animator.animate_to(
                targets,
                self.config.duration,
                self.config.easing,
                self.clock.now(),
            );
            self.begin(id, TransitionKind::Jump);
        }

        self.indicator.notify(self.model.count(), index);
        self.page_changed.emit(index);
    }

    /// Animate the current page and its neighbours back to rest.
    fn snap_back(&mut self) {
        if !self.ready || self.model.is_empty() {
            return;
        }
        self.supersede_drag();
        let extent = self.extent();
        let bindings = self.bindings_for(self.resting_lean());
        self.animator.prepare_slots(bindings);
        let targets = SlotTargets::new()
            .with(Slot::Before, self.target(-extent, 0.0))
            .with(Slot::Current, self.target(0.0, 1.0))
            .with(Slot::After, self.target(extent, 0.0));
        let id = self.animator.animate_to(
            targets,
            self.config.duration,
            self.config.easing,
            self.clock.now(),
        );
        self.begin(id, TransitionKind::SnapBack);
    }

    fn autoplay_tick(&mut self) {
        if self.gesture.is_tracking() {
            tracing::trace!(target: "horizon_swiper::autoplay", "tick dropped during touch");
            return;
        }
        match self.autoplay.tick_action(&self.model) {
            AutoplayAction::Advance => {
                tracing::trace!(target: "horizon_swiper::autoplay", "tick: advance");
                self.navigate(true, None);
            }
            AutoplayAction::ResetToFirst => {
                tracing::trace!(target: "horizon_swiper::autoplay", "tick: reset to first page");
                if let Err(error) = self.switch_page(Some(0)) {
                    tracing::warn!(target: "horizon_swiper::autoplay", %error, "reset failed");
                }
            }
            AutoplayAction::Skip => {}
        }
    }
}

impl<V: AnimatedScalar> SwiperHandle for SwiperController<V> {
    fn next_page(&mut self) -> bool {
        self.navigate(true, None)
    }

    fn prev_page(&mut self) -> bool {
        self.navigate(false, None)
    }

    fn switch_page(&mut self, index: Option<usize>) -> Result<()> {
        if self.disposed {
            tracing::warn!(target: "horizon_swiper::controller", "switch_page on disposed controller");
            return Err(SwiperError::Disposed);
        }
        let Some(index) = index else {
            self.snap_back();
            return Ok(());
        };
        let count = self.model.count();
        if index >= count {
            tracing::warn!(target: "horizon_swiper::controller", index, count, "switch_page out of range");
            return Err(SwiperError::PageOutOfRange { index, count });
        }
        if index == self.model.current() {
            if self.state.is_busy() {
                self.snap_back();
            }
            return Ok(());
        }
        self.jump(index);
        Ok(())
    }
}

impl<V: AnimatedScalar> Drop for SwiperController<V> {
    fn drop(&mut self) {
        self.dispose();
    }
}
