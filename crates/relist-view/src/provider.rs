#![forbid(unsafe_code)]

//! Redraw targets and the provider interface the engine invalidates through.
//!
//! A [`RedrawTarget`] is one receiver of invalidation: a view, a canvas, a
//! test double. A [`ViewProvider`] fans every request out to the targets it
//! currently knows about, so list state can stay ignorant of how many
//! surfaces display it.

use std::any::Any;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use relist_core::geometry::RectF;

/// Process-wide identity of a redraw target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(u64);

static NEXT_TARGET_ID: AtomicU64 = AtomicU64::new(1);

impl TargetId {
    /// Mint an id no other target in this process carries.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Measured size of a redraw target, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasuredSize {
    pub width: f32,
    pub height: f32,
}

impl MeasuredSize {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One surface that can be asked to redraw.
///
/// Only [`id`](Self::id) and [`invalidate`](Self::invalidate) are required.
/// A target without a parent ignores the parent requests.
pub trait RedrawTarget {
    fn id(&self) -> TargetId;

    /// Redraw everything.
    fn invalidate(&self);

    /// Redraw the given region.
    fn invalidate_rect(&self, dirty: RectF) {
        let _ = dirty;
        self.invalidate();
    }

    fn invalidate_parent(&self) {}

    fn invalidate_parent_rect(&self, dirty: RectF) {
        let _ = dirty;
        self.invalidate_parent();
    }

    /// Recompute the target's outline (clip/shadow shape).
    fn invalidate_outline(&self) {}

    fn request_layout(&self) {}

    /// Play the platform's click feedback, if it has one.
    fn perform_click_feedback(&self) {}

    fn measured_size(&self) -> MeasuredSize {
        MeasuredSize::default()
    }

    /// Whether the target can still receive requests. Dead targets are
    /// dropped by registries on their next fan-out.
    fn is_alive(&self) -> bool {
        true
    }

    /// Refresh content derived from `cause`. Returns whether anything was
    /// invalidated.
    fn invalidate_content(&self, cause: &dyn Any) -> bool {
        let _ = cause;
        false
    }
}

/// Overrides how a provider handles [`ViewProvider::invalidate_content`].
pub trait ContentInvalidator {
    fn invalidate_content(&self, cause: &dyn Any) -> bool;
}

impl<F: Fn(&dyn Any) -> bool> ContentInvalidator for F {
    fn invalidate_content(&self, cause: &dyn Any) -> bool {
        self(cause)
    }
}

/// Fan-out of redraw requests to zero or more targets.
///
/// All operations take `&self`: providers are shared between the list state
/// that invalidates and the host that attaches targets.
pub trait ViewProvider {
    /// Whether any request would currently reach a target.
    fn has_any_target(&self) -> bool;

    /// Whether the target with `id` is served by this provider.
    fn belongs_to(&self, id: TargetId) -> bool;

    /// First live target, if any.
    fn find_any_target(&self) -> Option<Rc<dyn RedrawTarget>>;

    fn invalidate(&self);

    fn invalidate_rect(&self, dirty: RectF);

    fn invalidate_parent(&self);

    fn invalidate_parent_rect(&self, dirty: RectF);

    /// Recompute outlines, then redraw as well when `with_invalidate`.
    fn invalidate_outline(&self, with_invalidate: bool);

    fn request_layout(&self);

    /// Click feedback is played once, by the first live target.
    fn perform_click_feedback(&self) {
        if let Some(target) = self.find_any_target() {
            target.perform_click_feedback();
        }
    }

    /// Size of the first live target, zero when there is none.
    fn measured_size(&self) -> MeasuredSize {
        self.find_any_target()
            .map(|target| target.measured_size())
            .unwrap_or_default()
    }

    fn invalidate_content(&self, cause: &dyn Any) -> bool;
}

/// Adapt a shared provider into a change sink that invalidates it.
///
/// ```
/// use std::rc::Rc;
/// use relist_core::engine::ListAnimator;
/// use relist_view::{SingleViewProvider, invalidate_sink};
///
/// let provider = Rc::new(SingleViewProvider::empty());
/// let animator: ListAnimator<u32> = ListAnimator::new(invalidate_sink(Rc::clone(&provider)));
/// assert!(animator.is_empty());
/// ```
pub fn invalidate_sink<P>(provider: Rc<P>) -> impl FnMut() + 'static
where
    P: ViewProvider + ?Sized + 'static,
{
    move || provider.invalidate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Bare {
        id: TargetId,
        invalidations: Cell<u32>,
        parent: Cell<u32>,
    }

    impl RedrawTarget for Bare {
        fn id(&self) -> TargetId {
            self.id
        }

        fn invalidate(&self) {
            self.invalidations.set(self.invalidations.get() + 1);
        }

        fn invalidate_parent(&self) {
            self.parent.set(self.parent.get() + 1);
        }
    }

    #[test]
    fn target_ids_are_unique() {
        let a = TargetId::next();
        let b = TargetId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn region_requests_fall_back_to_full_redraws() {
        let target = Bare {
            id: TargetId::next(),
            invalidations: Cell::new(0),
            parent: Cell::new(0),
        };
        target.invalidate_rect(RectF::new(0.0, 0.0, 4.0, 4.0));
        target.invalidate_parent_rect(RectF::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(target.invalidations.get(), 1);
        assert_eq!(target.parent.get(), 1);
        assert!(target.is_alive());
        assert!(!target.invalidate_content(&()));
        assert_eq!(target.measured_size(), MeasuredSize::default());
    }

    #[test]
    fn closures_override_content_invalidation() {
        let only_strings = |cause: &dyn Any| cause.is::<String>();
        assert!(only_strings.invalidate_content(&String::from("avatar")));
        assert!(!only_strings.invalidate_content(&7u32));
    }
}
