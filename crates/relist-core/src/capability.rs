#![forbid(unsafe_code)]

//! Optional item capabilities.
//!
//! The engine treats items as opaque values compared with `PartialEq`. An
//! item opts into extra behavior by returning a trait object from one of the
//! [`ListItem`] accessors; the defaults return `None`, so a plain value type
//! needs an empty `impl` and nothing else.
//!
//! | Capability      | Used by                                   |
//! |-----------------|-------------------------------------------|
//! | [`Animatable`]  | item-owned state that animates with the list |
//! | [`Measurable`]  | the measurement pass (rects, totals, line width) |
//! | [`Destroyable`] | teardown when an entry is evicted         |

use crate::animation::Factor;

/// How a [`Measurable`] item is positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoordsMode {
    /// Laid out after the previous item, accumulating spacing and size.
    #[default]
    Flow,
    /// Placed at the item's own `x()`/`y()`.
    Absolute,
}

/// Item-owned state that follows the list's animation factor.
pub trait Animatable {
    /// Whether the item has pending changes to animate in.
    fn has_changes(&self) -> bool;

    /// Retarget internal values toward the pending changes.
    fn prepare_changes(&mut self);

    /// Apply pending changes immediately, without animation.
    fn apply_changes(&mut self);

    /// Evaluate internal values at `factor`. Returns whether anything moved.
    fn apply_animation(&mut self, factor: Factor) -> bool;

    /// Finalize internal values; see
    /// [`InterpolatedScalar::finish_animation`](crate::animation::InterpolatedScalar::finish_animation).
    fn finish_animation(&mut self, commit: bool);
}

/// Item that contributes a rectangle to the list layout.
pub trait Measurable {
    /// Item width, without spacing.
    fn width(&self) -> f32;

    /// Item height, without spacing.
    fn height(&self) -> f32;

    /// Leading spacing. `is_first` is true for the item at index 0.
    fn spacing_start(&self, is_first: bool) -> f32 {
        let _ = is_first;
        0.0
    }

    /// Trailing spacing. `is_last` is true for the last settled item.
    fn spacing_end(&self, is_last: bool) -> f32 {
        let _ = is_last;
        0.0
    }

    /// Horizontal position, read in [`CoordsMode::Absolute`].
    fn x(&self) -> f32 {
        0.0
    }

    /// Vertical position, read in [`CoordsMode::Absolute`].
    fn y(&self) -> f32 {
        0.0
    }

    /// Positioning mode.
    fn coords(&self) -> CoordsMode {
        CoordsMode::Flow
    }
}

/// Item holding resources that must be released when it leaves the list.
pub trait Destroyable {
    /// Release resources. Called exactly once per entry.
    fn destroy(&mut self);
}

/// An element of a reconciled list.
///
/// Equality decides identity across reconciles: an item equal to one
/// already present keeps that entry (and its animated state).
pub trait ListItem: PartialEq {
    /// Animation capability, if any.
    fn as_animatable(&mut self) -> Option<&mut dyn Animatable> {
        None
    }

    /// Measurement capability, if any.
    fn as_measurable(&self) -> Option<&dyn Measurable> {
        None
    }

    /// Teardown capability, if any.
    fn as_destroyable(&mut self) -> Option<&mut dyn Destroyable> {
        None
    }
}

macro_rules! plain_list_item {
    ($($ty:ty),* $(,)?) => {
        $(impl ListItem for $ty {})*
    };
}

plain_list_item!(
    u8,
    u16,
    u32,
    u64,
    usize,
    i8,
    i16,
    i32,
    i64,
    isize,
    char,
    bool,
    String,
    &'static str,
);
