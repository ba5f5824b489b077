#![forbid(unsafe_code)]

//! Geometric value types produced by measurement.

/// An edge-based rectangle in layout units.
///
/// Unlike a cell rectangle this carries fractional edges, because an entry's
/// measured rectangle is read mid-animation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl RectF {
    /// Create a rectangle from its four edges.
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent (`right - left`).
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent (`bottom - top`).
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Vertical center.
    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub fn offset(&self, dx: f32, dy: f32) -> RectF {
        RectF::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &RectF) -> RectF {
        RectF::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}
