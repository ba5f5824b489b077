#![forbid(unsafe_code)]

//! Retargetable interpolated values.
//!
//! An [`InterpolatedScalar`] is a `from / current / to` triple. Retargeting
//! with [`set_to`](InterpolatedScalar::set_to) starts the next leg from the
//! value currently on screen, so an interrupted transition never jumps.
//!
//! # Invariants
//!
//! 1. `current == from + (to - from) * factor` for the last applied factor.
//! 2. After [`finish_animation`](InterpolatedScalar::finish_animation),
//!    `from == current == to`.
//! 3. `set_to(v)` with `v == to` leaves the triple untouched.

use super::Factor;
use crate::geometry::RectF;

/// A float with an explicit animation triple.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterpolatedScalar {
    from: f32,
    current: f32,
    to: f32,
}

impl InterpolatedScalar {
    /// Create a settled value.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self {
            from: value,
            current: value,
            to: value,
        }
    }

    /// Value currently on screen.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Start of the running leg.
    #[inline]
    pub fn from(&self) -> f32 {
        self.from
    }

    /// Destination of the running leg.
    #[inline]
    pub fn to(&self) -> f32 {
        self.to
    }

    /// Whether `from != to`.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.from != self.to
    }

    /// Snap to `value` with no animation.
    pub fn set(&mut self, value: f32) {
        self.from = value;
        self.current = value;
        self.to = value;
    }

    /// Retarget to `value`, continuing from the current visual value.
    pub fn set_to(&mut self, value: f32) {
        if self.to != value {
            self.from = self.current;
            self.to = value;
        }
    }

    /// Restart the running leg at the current visual value.
    pub fn rebase(&mut self) {
        self.from = self.current;
    }

    /// Whether the destination differs from `value`.
    #[inline]
    pub fn differs(&self, value: f32) -> bool {
        self.to != value
    }

    /// Evaluate at `factor`. Returns whether the visual value moved.
    pub fn apply_animation(&mut self, factor: Factor) -> bool {
        let next = factor.lerp(self.from, self.to);
        if next != self.current {
            self.current = next;
            true
        } else {
            false
        }
    }

    /// Finalize the running leg.
    ///
    /// `commit` lands on the destination. Otherwise the value freezes where
    /// it currently is and the destination is dropped.
    pub fn finish_animation(&mut self, commit: bool) {
        if commit {
            self.from = self.to;
            self.current = self.to;
        } else {
            self.from = self.current;
            self.to = self.current;
        }
    }
}

/// Four interpolated edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterpolatedRect {
    left: InterpolatedScalar,
    top: InterpolatedScalar,
    right: InterpolatedScalar,
    bottom: InterpolatedScalar,
}

impl InterpolatedRect {
    /// Create a settled rectangle.
    #[must_use]
    pub const fn new(rect: RectF) -> Self {
        Self {
            left: InterpolatedScalar::new(rect.left),
            top: InterpolatedScalar::new(rect.top),
            right: InterpolatedScalar::new(rect.right),
            bottom: InterpolatedScalar::new(rect.bottom),
        }
    }

    /// Rectangle currently on screen.
    pub fn rect(&self) -> RectF {
        RectF::new(
            self.left.get(),
            self.top.get(),
            self.right.get(),
            self.bottom.get(),
        )
    }

    /// Destination rectangle.
    pub fn target(&self) -> RectF {
        RectF::new(
            self.left.to(),
            self.top.to(),
            self.right.to(),
            self.bottom.to(),
        )
    }

    /// Rectangle at the start of the running leg.
    pub fn previous(&self) -> RectF {
        RectF::new(
            self.left.from(),
            self.top.from(),
            self.right.from(),
            self.bottom.from(),
        )
    }

    /// Whether any destination edge differs.
    pub fn differs(&self, left: f32, top: f32, right: f32, bottom: f32) -> bool {
        self.left.differs(left)
            || self.top.differs(top)
            || self.right.differs(right)
            || self.bottom.differs(bottom)
    }

    /// Snap all edges.
    pub fn set(&mut self, left: f32, top: f32, right: f32, bottom: f32) {
        self.left.set(left);
        self.top.set(top);
        self.right.set(right);
        self.bottom.set(bottom);
    }

    /// Retarget all edges.
    pub fn set_to(&mut self, left: f32, top: f32, right: f32, bottom: f32) {
        self.left.set_to(left);
        self.top.set_to(top);
        self.right.set_to(right);
        self.bottom.set_to(bottom);
    }

    /// Restart every edge's leg at its current value.
    pub fn rebase(&mut self) {
        self.left.rebase();
        self.top.rebase();
        self.right.rebase();
        self.bottom.rebase();
    }

    /// Evaluate every edge. Returns whether any edge moved.
    pub fn apply_animation(&mut self, factor: Factor) -> bool {
        let mut changed = self.left.apply_animation(factor);
        changed |= self.top.apply_animation(factor);
        changed |= self.right.apply_animation(factor);
        changed |= self.bottom.apply_animation(factor);
        changed
    }

    /// Finalize every edge.
    pub fn finish_animation(&mut self, commit: bool) {
        self.left.finish_animation(commit);
        self.top.finish_animation(commit);
        self.right.finish_animation(commit);
        self.bottom.finish_animation(commit);
    }
}
