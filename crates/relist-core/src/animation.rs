#![forbid(unsafe_code)]

//! Interpolation primitives shared by entries, metadata, and the driver.
//!
//! Every animated value in the engine is a `from / current / to` triple
//! ([`InterpolatedScalar`]). One [`Factor`] in `[0, 1]` is applied to all of
//! them at once, so an entire list transition stays in lockstep: a single
//! [`FactorDriver`] advances the factor and the engine fans it out.
//!
//! Easing curves live here as plain functions; the driver applies one to its
//! raw time progress before reporting the factor.

pub mod driver;
pub mod interpolated;

pub use driver::{FactorAnimator, FactorDriver, FactorEvent};
pub use interpolated::{InterpolatedRect, InterpolatedScalar};

// ---------------------------------------------------------------------------
// Factor
// ---------------------------------------------------------------------------

/// Progress of the current list transition.
///
/// Passed explicitly into every `apply_animation` call. Values are usually in
/// `[0, 1]`, but curves with overshoot may step outside; the value is not
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Factor(f32);

impl Factor {
    /// Nothing applied yet.
    pub const START: Factor = Factor(0.0);
    /// Transition complete.
    pub const END: Factor = Factor(1.0);

    /// Wrap a raw factor value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Whether this is the terminal factor (`1.0`) that triggers settling.
    #[inline]
    pub fn is_end(self) -> bool {
        self.0 == 1.0
    }

    /// Linear interpolation between `from` and `to` at this factor.
    #[inline]
    pub fn lerp(self, from: f32, to: f32) -> f32 {
        from + (to - from) * self.0
    }
}

impl From<f32> for Factor {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-in.
#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Cubic ease-out. The usual curve for list reflow.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Look up a stock easing curve by its config name.
///
/// Accepts the function names above; `-` and `_` are interchangeable and
/// matching is case-insensitive.
#[must_use]
pub fn easing_by_name(name: &str) -> Option<EasingFn> {
    let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
    let easing: EasingFn = match normalized.as_str() {
        "linear" => linear,
        "ease_in" => ease_in,
        "ease_out" => ease_out,
        "ease_in_out" => ease_in_out,
        "ease_in_cubic" => ease_in_cubic,
        "ease_out_cubic" => ease_out_cubic,
        _ => return None,
    };
    Some(easing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_lerp() {
        assert_eq!(Factor::START.lerp(10.0, 20.0), 10.0);
        assert_eq!(Factor::END.lerp(10.0, 20.0), 20.0);
        assert_eq!(Factor::new(0.25).lerp(0.0, 8.0), 2.0);
        assert_eq!(Factor::new(0.5).lerp(8.0, 0.0), 4.0);
    }

    #[test]
    fn factor_end_is_exact() {
        assert!(Factor::END.is_end());
        assert!(!Factor::new(0.999).is_end());
        assert!(!Factor::new(1.2).is_end());
    }

    #[test]
    fn easing_endpoints() {
        for easing in [
            linear,
            ease_in,
            ease_out,
            ease_in_out,
            ease_in_cubic,
            ease_out_cubic,
        ] {
            assert!((easing(0.0) - 0.0).abs() < f32::EPSILON);
            assert!((easing(1.0) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn easing_clamps_input() {
        assert_eq!(linear(-1.0), 0.0);
        assert_eq!(ease_out(1.5), 1.0);
    }

    #[test]
    fn ease_out_leads_linear() {
        assert!(ease_out(0.5) > linear(0.5));
        assert!(ease_in(0.5) < linear(0.5));
        assert!(ease_out_cubic(0.5) > ease_out(0.5));
    }

    #[test]
    fn easing_lookup_by_name() {
        assert!(easing_by_name("linear").is_some());
        assert!(easing_by_name("Ease-Out-Cubic").is_some());
        assert!(easing_by_name(" ease_in ").is_some());
        assert!(easing_by_name("bounce").is_none());
        let f = easing_by_name("ease_in").unwrap();
        assert!((f(0.5) - 0.25).abs() < f32::EPSILON);
    }
}
