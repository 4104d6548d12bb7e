//! Transition animator.
//!
//! [`TransitionAnimator`] owns one animated offset and one animated opacity
//! per page and runs bounded-duration transitions on them. Transitions are
//! addressed through three logical [`Slot`]s (before, current, after); the
//! caller binds each slot to a concrete page with
//! [`prepare_slots`](TransitionAnimator::prepare_slots) before every
//! [`animate_to`](TransitionAnimator::animate_to).
//!
//! Only one transition runs at a time. Starting a new one supersedes the old
//! one: values the new transition re-targets continue from wherever they are,
//! and values it leaves alone jump straight to their final target so no page
//! is left frozen part-way across the viewport. A superseded transition is
//! never reported as finished.

use std::time::Duration;

use crate::index::{PageIndexModel, Slot};

use super::easing::Easing;
use super::transition::TransitionId;
use super::value::{AnimatedScalar, TweenValue};

/// Which page backs each slot for the upcoming transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotBindings {
    /// Page in the "before" slot.
    pub before: Option<usize>,
    /// Page in the "current" slot.
    pub current: Option<usize>,
    /// Page in the "after" slot.
    pub after: Option<usize>,
}

impl SlotBindings {
    /// Bindings of the current page and its neighbours.
    ///
    /// When both neighbours are the same page (two pages, circular), the page
    /// is bound only to the "after" slot.
    pub fn around(model: &PageIndexModel) -> Self {
        let before = model.neighbor(Slot::Before);
        let after = model.neighbor(Slot::After);
        Self {
            before: before.filter(|&b| Some(b) != after),
            current: model.neighbor(Slot::Current),
            after,
        }
    }

    /// The page bound to `slot`.
    #[inline]
    pub fn get(&self, slot: Slot) -> Option<usize> {
        match slot {
            Slot::Before => self.before,
            Slot::Current => self.current,
            Slot::After => self.after,
        }
    }

    /// Bind `slot` to `page`.
    pub fn set(&mut self, slot: Slot, page: Option<usize>) {
        match slot {
            Slot::Before => self.before = page,
            Slot::Current => self.current = page,
            Slot::After => self.after = page,
        }
    }

    /// The slot `page` is bound to, if any.
    pub fn slot_of(&self, page: usize) -> Option<Slot> {
        Slot::ALL.into_iter().find(|&slot| self.get(slot) == Some(page))
    }
}

/// Final values for one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotTarget {
    /// Target offset along the paging axis.
    pub offset: f32,
    /// Target opacity; `None` leaves opacity untouched.
    pub opacity: Option<f32>,
}

impl SlotTarget {
    /// A target that only moves the page.
    pub fn offset(offset: f32) -> Self {
        Self {
            offset,
            opacity: None,
        }
    }

    /// A target that moves the page and fades it.
    pub fn with_opacity(offset: f32, opacity: f32) -> Self {
        Self {
            offset,
            opacity: Some(opacity),
        }
    }
}

/// Per-slot targets for one transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlotTargets {
    /// Target for the "before" slot.
    pub before: Option<SlotTarget>,
    /// Target for the "current" slot.
    pub current: Option<SlotTarget>,
    /// Target for the "after" slot.
    pub after: Option<SlotTarget>,
}

impl SlotTargets {
    /// Empty target set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target for `slot` using builder pattern.
    pub fn with(mut self, slot: Slot, target: SlotTarget) -> Self {
        match slot {
            Slot::Before => self.before = Some(target),
            Slot::Current => self.current = Some(target),
            Slot::After => self.after = Some(target),
        }
        self
    }

    /// The target for `slot`.
    #[inline]
    pub fn get(&self, slot: Slot) -> Option<SlotTarget> {
        match slot {
            Slot::Before => self.before,
            Slot::Current => self.current,
            Slot::After => self.after,
        }
    }
}

/// Animated channels of one page.
#[derive(Debug, Default)]
struct PageChannels<V> {
    offset: V,
    opacity: V,
}

impl<V: AnimatedScalar> PageChannels<V> {
    fn is_animating(&self) -> bool {
        self.offset.is_animating() || self.opacity.is_animating()
    }

    fn stop(&mut self) {
        self.offset.stop();
        self.opacity.stop();
    }

    fn jump_to_target(&mut self) {
        let (offset, opacity) = (self.offset.target(), self.opacity.target());
        self.offset.set(offset);
        self.opacity.set(opacity);
    }
}

#[derive(Debug, Clone)]
struct ActiveTransition {
    id: TransitionId,
    pages: Vec<usize>,
}

/// Owns the per-page animated values and runs transitions on them.
#[derive(Debug)]
pub struct TransitionAnimator<V: AnimatedScalar = TweenValue> {
    pages: Vec<PageChannels<V>>,
    bindings: SlotBindings,
    prepared: bool,
    active: Option<ActiveTransition>,
    next_id: u64,
}

impl<V: AnimatedScalar> Default for TransitionAnimator<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: AnimatedScalar> TransitionAnimator<V> {
    /// Create an animator with no pages allocated.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            bindings: SlotBindings::default(),
            prepared: false,
            active: None,
            next_id: 0,
        }
    }

    /// Number of allocated pages.
    #[inline]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no pages are allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// (Re)allocate one offset/opacity pair per page, all at rest.
    ///
    /// Any running transition is dropped without completing.
    pub fn allocate(&mut self, model: &PageIndexModel, extent: f32, fade_in: bool) {
        self.pages.clear();
        self.pages.resize_with(model.count(), PageChannels::default);
        self.active = None;
        self.prepared = false;
        self.relayout(model, extent, fade_in);
        tracing::debug!(
            target: "horizon_swiper::animation",
            count = model.count(),
            extent,
            "allocated animated positions"
        );
    }

    /// Snap every page to its idle position for `extent`.
    ///
    /// The current page rests at 0, its neighbours at `-extent`/`+extent`,
    /// and every other page parks at `+extent`. With `fade_in` only the
    /// current page is opaque.
    pub fn relayout(&mut self, model: &PageIndexModel, extent: f32, fade_in: bool) {
        let idle = SlotBindings::around(model);
        for (page, channels) in self.pages.iter_mut().enumerate() {
            let offset = match idle.slot_of(page) {
                Some(slot) => slot.idle_offset(extent),
                None => extent,
            };
            let opacity = if !fade_in || idle.current == Some(page) {
                1.0
            } else {
                0.0
            };
            channels.offset.set(offset);
            channels.opacity.set(opacity);
        }
        self.active = None;
    }

    /// Bind slots to pages for the next [`animate_to`](Self::animate_to),
    /// [`snap_to`](Self::snap_to) or [`interrupt`](Self::interrupt).
    ///
    /// Pages outside the allocated range are unbound.
    pub fn prepare_slots(&mut self, bindings: SlotBindings) {
        let len = self.pages.len();
        let mut checked = bindings;
        for slot in Slot::ALL {
            checked.set(slot, bindings.get(slot).filter(|&page| page < len));
        }
        self.bindings = checked;
        self.prepared = true;
    }

    /// The current slot bindings.
    #[inline]
    pub fn bindings(&self) -> SlotBindings {
        self.bindings
    }

    /// Start a transition of the bound slots towards `targets`.
    ///
    /// Supersedes any running transition. Consumes the slot bindings: the
    /// next transition needs a fresh [`prepare_slots`](Self::prepare_slots).
    /// Returns `None` (and starts nothing) when slots were not prepared.
    pub fn animate_to(
        &mut self,
        targets: SlotTargets,
        duration: Duration,
        easing: Easing,
        now: Duration,
    ) -> Option<TransitionId> {
        if !self.prepared {
            tracing::warn!(
                target: "horizon_swiper::animation",
                "animate_to called without prepared slot bindings"
            );
            return None;
        }
        self.prepared = false;

        let mut driven = Vec::with_capacity(3);
        for slot in Slot::ALL {
            if let (Some(page), Some(target)) = (self.bindings.get(slot), targets.get(slot)) {
                driven.retain(|(p, _)| *p != page);
                driven.push((page, target));
            }
        }

        let retained: Vec<usize> = driven.iter().map(|(page, _)| *page).collect();
        self.preempt(&retained);

        for &(page, target) in &driven {
            let channels = &mut self.pages[page];
            channels.offset.animate_to(target.offset, duration, easing, now);
            if let Some(opacity) = target.opacity {
                channels.opacity.animate_to(opacity, duration, easing, now);
            }
        }

        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.active = Some(ActiveTransition {
            id,
            pages: retained,
        });
        tracing::debug!(
            target: "horizon_swiper::animation",
            %id,
            pages = ?self.active.as_ref().map(|a| &a.pages),
            ?duration,
            "transition started"
        );
        Some(id)
    }

    /// Immediately place the page bound to `slot` at `offset`.
    pub fn snap_to(&mut self, slot: Slot, offset: f32) {
        if let Some(page) = self.bindings.get(slot) {
            self.pages[page].offset.set(offset);
        }
    }

    /// Immediately set the opacity of the page bound to `slot`.
    pub fn snap_opacity(&mut self, slot: Slot, opacity: f32) {
        if let Some(page) = self.bindings.get(slot) {
            self.pages[page].opacity.set(opacity);
        }
    }

    /// Hand the bound slots over to direct writes (a drag).
    ///
    /// Any running transition is superseded: bound pages freeze where they
    /// are, other pages it was moving jump to their targets.
    pub fn interrupt(&mut self) {
        let bound: Vec<usize> = Slot::ALL
            .into_iter()
            .filter_map(|slot| self.bindings.get(slot))
            .collect();
        self.preempt(&bound);
        for page in bound {
            self.pages[page].stop();
        }
    }

    fn preempt(&mut self, retained: &[usize]) {
        let Some(active) = self.active.take() else {
            return;
        };
        for page in active.pages {
            if !retained.contains(&page)
                && let Some(channels) = self.pages.get_mut(page)
            {
                channels.jump_to_target();
            }
        }
        tracing::debug!(target: "horizon_swiper::animation", id = %active.id, "transition superseded");
    }

    /// Advance animations to `now`.
    ///
    /// Returns the id of the running transition if it completed during this step.
    pub fn step(&mut self, now: Duration) -> Option<TransitionId> {
        for channels in &mut self.pages {
            channels.offset.step(now);
            channels.opacity.step(now);
        }

        let finished = self.active.as_ref().is_some_and(|active| {
            active
                .pages
                .iter()
                .all(|&page| self.pages.get(page).is_none_or(|c| !c.is_animating()))
        });
        if !finished {
            return None;
        }

        let active = self.active.take()?;
        tracing::debug!(target: "horizon_swiper::animation", id = %active.id, "transition finished");
        Some(active.id)
    }

    /// Stop everything where it stands and forget the running transition.
    pub fn stop(&mut self) {
        for channels in &mut self.pages {
            channels.stop();
        }
        self.active = None;
        self.prepared = false;
    }

    /// Whether a transition is running.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// The id of the running transition.
    pub fn active_transition(&self) -> Option<TransitionId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Current offset of `page`.
    pub fn offset(&self, page: usize) -> Option<f32> {
        self.pages.get(page).map(|c| c.offset.value())
    }

    /// Current opacity of `page`.
    pub fn opacity(&self, page: usize) -> Option<f32> {
        self.pages.get(page).map(|c| c.opacity.value())
    }

    /// Current offset of the page bound to `slot`.
    pub fn slot_offset(&self, slot: Slot) -> Option<f32> {
        self.bindings.get(slot).and_then(|page| self.offset(page))
    }
}
