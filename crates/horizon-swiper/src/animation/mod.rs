//! Animated positions and transitions.
//!
//! - [`Easing`] curves and [`ease`]/[`lerp_eased`]
//! - [`AnimatedScalar`], the primitive the engine animates, and its default
//!   implementation [`TweenValue`]
//! - [`TransitionAnimator`], which owns one offset and one opacity per page
//!   and runs slot-addressed transitions on them
//! - [`settle_duration`] for velocity-scaled settles

mod animator;
mod easing;
mod transition;
mod value;

pub use animator::{SlotBindings, SlotTarget, SlotTargets, TransitionAnimator};
pub use easing::{Easing, ease, lerp_eased};
pub use transition::{TransitionId, TransitionKind, TransitionState, settle_duration};
pub use value::{AnimatedScalar, TweenValue};
