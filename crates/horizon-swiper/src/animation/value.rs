//! Animated scalar values.
//!
//! [`AnimatedScalar`] is the primitive the transition animator drives: a
//! single number that can be set immediately or animated towards a target
//! over time. [`TweenValue`] is the default implementation, a timed
//! interpolation along an [`Easing`] curve on the engine's virtual timeline.

use std::time::Duration;

use super::easing::{Easing, lerp_eased};

/// A scalar that can jump to a value or animate towards one.
///
/// Times are points on the engine timeline (see
/// [`FrameClock`](horizon_swiper_core::FrameClock)).
pub trait AnimatedScalar: Default {
    /// Set the value immediately, cancelling any running animation.
    fn set(&mut self, value: f32);

    /// Start animating from the current value to `target`.
    ///
    /// Replaces any running animation. A zero duration completes on the next
    /// [`step`](Self::step).
    fn animate_to(&mut self, target: f32, duration: Duration, easing: Easing, now: Duration);

    /// Stop a running animation, leaving the value where it is.
    fn stop(&mut self);

    /// The current value.
    fn value(&self) -> f32;

    /// The value the scalar is heading to (its current value when idle).
    fn target(&self) -> f32;

    /// Whether an animation is running.
    fn is_animating(&self) -> bool;

    /// Advance the animation to `now`.
    ///
    /// Returns `true` exactly once, on the step where a running animation
    /// reaches its target.
    fn step(&mut self, now: Duration) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    from: f32,
    to: f32,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

/// A timed interpolation between two values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TweenValue {
    value: f32,
    tween: Option<Tween>,
}

impl TweenValue {
    /// Create a value at rest.
    pub fn new(value: f32) -> Self {
        Self { value, tween: None }
    }
}

impl AnimatedScalar for TweenValue {
    fn set(&mut self, value: f32) {
        self.value = value;
        self.tween = None;
    }

    fn animate_to(&mut self, target: f32, duration: Duration, easing: Easing, now: Duration) {
        self.tween = Some(Tween {
            from: self.value,
            to: target,
            start: now,
            duration,
            easing,
        });
    }

    fn stop(&mut self) {
        self.tween = None;
    }

    #[inline]
    fn value(&self) -> f32 {
        self.value
    }

    fn target(&self) -> f32 {
        self.tween.map_or(self.value, |t| t.to)
    }

    #[inline]
    fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    fn step(&mut self, now: Duration) -> bool {
        let Some(tween) = self.tween else {
            return false;
        };

        let elapsed = now.saturating_sub(tween.start);
        let progress = if tween.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / tween.duration.as_secs_f32()).min(1.0)
        };

        if progress >= 1.0 {
            self.value = tween.to;
            self.tween = None;
            return true;
        }

        self.value = lerp_eased(tween.easing, tween.from, tween.to, progress);
        false
    }
}
