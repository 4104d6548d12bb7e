//! Easing curves for page transitions.
//!
//! An easing curve maps linear progress (0.0 to 1.0) onto eased progress.
//! Page settles default to [`Easing::Ease`], a gentle acceleration that reads
//! naturally for content sliding into place.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Available easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// React Native's `Easing.ease`, `cubic-bezier(0.42, 0.0, 1.0, 1.0)`
    /// (the CSS `ease-in` curve).
    #[default]
    Ease,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Quadratic ease-in-out (smooth start and end).
    EaseInOut,
    /// Cubic ease-out, a snappier settle for flicks.
    EaseOutCubic,
    /// Sinusoidal ease-in-out.
    EaseInOutSine,
    /// A custom cubic Bézier timing curve with control points `(x1, y1, x2, y2)`.
    ///
    /// `x1` and `x2` are clamped to `0.0..=1.0` so the curve stays monotonic in time.
    CubicBezier(f32, f32, f32, f32),
}

/// Apply an easing curve to a progress value.
///
/// `t` is clamped to `0.0..=1.0` first.
///
/// # Example
///
/// ```
/// use horizon_swiper::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::Ease => bezier_ease(t, 0.42, 0.0, 1.0, 1.0),
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        Easing::CubicBezier(x1, y1, x2, y2) => {
            bezier_ease(t, x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2)
        }
    }
}

/// Interpolate between two values using an easing curve.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease(easing, t)
}

// =============================================================================
// Cubic Bézier
// =============================================================================

#[inline]
fn cubic_bezier(p1: f32, p2: f32, t: f32) -> f32 {
    // Endpoints are fixed at 0 and 1.
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

/// Solve the curve's x(s) = t by bisection, then evaluate y(s).
fn bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x1 == y1 && x2 == y2 {
        return t;
    }

    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut s = t;
    for _ in 0..24 {
        let x = cubic_bezier(x1, x2, s);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    cubic_bezier(y1, y2, s)
}
