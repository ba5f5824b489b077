#![forbid(unsafe_code)]

//! Provider fanning requests out to a registry of targets.
//!
//! # Invariants
//!
//! 1. A target id appears in the registry at most once.
//! 2. Every fan-out first prunes targets whose [`RedrawTarget::is_alive`]
//!    reports `false`; a dead target never receives another request.
//! 3. Requests run on a snapshot of the registry, so a target may attach or
//!    detach targets from inside a callback.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use relist_core::geometry::RectF;

use crate::provider::{ContentInvalidator, RedrawTarget, TargetId, ViewProvider};

/// Registry of redraw targets sharing one list state.
#[derive(Default)]
pub struct MultipleViewProvider {
    targets: RefCell<Vec<Rc<dyn RedrawTarget>>>,
    content: RefCell<Option<Box<dyn ContentInvalidator>>>,
}

impl fmt::Debug for MultipleViewProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<TargetId> = self.targets.borrow().iter().map(|t| t.id()).collect();
        f.debug_struct("MultipleViewProvider")
            .field("targets", &ids)
            .field("content_override", &self.content.borrow().is_some())
            .finish()
    }
}

impl MultipleViewProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route [`invalidate_content`](ViewProvider::invalidate_content)
    /// through `invalidator` instead of the targets.
    #[must_use]
    pub fn with_content_invalidator(self, invalidator: impl ContentInvalidator + 'static) -> Self {
        self.set_content_invalidator(Some(Box::new(invalidator)));
        self
    }

    /// Install or clear the content-invalidation override.
    pub fn set_content_invalidator(&self, invalidator: Option<Box<dyn ContentInvalidator>>) {
        *self.content.borrow_mut() = invalidator;
    }

    /// Register `target`. Returns `false` if a target with the same id is
    /// already attached.
    pub fn attach(&self, target: Rc<dyn RedrawTarget>) -> bool {
        let mut targets = self.targets.borrow_mut();
        let id = target.id();
        if targets.iter().any(|t| t.id() == id) {
            return false;
        }
        targets.push(target);
        true
    }

    /// Unregister the target with `id`. Returns whether it was attached.
    pub fn detach(&self, id: TargetId) -> bool {
        let mut targets = self.targets.borrow_mut();
        let before = targets.len();
        targets.retain(|t| t.id() != id);
        targets.len() != before
    }

    pub fn detach_all(&self) {
        self.targets.borrow_mut().clear();
    }

    /// Number of registered targets, dead ones included until the next
    /// fan-out prunes them.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.borrow().is_empty()
    }

    /// Drop dead targets and snapshot the live ones.
    fn live_targets(&self) -> Vec<Rc<dyn RedrawTarget>> {
        let mut targets = self.targets.borrow_mut();
        let before = targets.len();
        targets.retain(|t| t.is_alive());
        let pruned = before - targets.len();
        if pruned > 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(pruned, remaining = targets.len(), "pruned dead redraw targets");
        }
        targets.clone()
    }

    fn for_each_target(&self, mut f: impl FnMut(&dyn RedrawTarget)) {
        for target in self.live_targets() {
            f(target.as_ref());
        }
    }
}

impl ViewProvider for MultipleViewProvider {
    fn has_any_target(&self) -> bool {
        !self.live_targets().is_empty()
    }

    fn belongs_to(&self, id: TargetId) -> bool {
        self.live_targets().iter().any(|t| t.id() == id)
    }

    fn find_any_target(&self) -> Option<Rc<dyn RedrawTarget>> {
        self.live_targets().into_iter().next()
    }

    fn invalidate(&self) {
        self.for_each_target(|t| t.invalidate());
    }

    fn invalidate_rect(&self, dirty: RectF) {
        self.for_each_target(|t| t.invalidate_rect(dirty));
    }

    fn invalidate_parent(&self) {
        self.for_each_target(|t| t.invalidate_parent());
    }

    fn invalidate_parent_rect(&self, dirty: RectF) {
        self.for_each_target(|t| t.invalidate_parent_rect(dirty));
    }

    fn invalidate_outline(&self, with_invalidate: bool) {
        self.for_each_target(|t| {
            t.invalidate_outline();
            if with_invalidate {
                t.invalidate();
            }
        });
    }

    fn request_layout(&self) {
        self.for_each_target(|t| t.request_layout());
    }

    /// Uses the override when one is installed; otherwise asks every live
    /// target and reports whether any of them invalidated.
    fn invalidate_content(&self, cause: &dyn Any) -> bool {
        if let Some(invalidator) = self.content.borrow().as_ref() {
            return invalidator.invalidate_content(cause);
        }
        let mut any = false;
        self.for_each_target(|t| any |= t.invalidate_content(cause));
        any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counter {
        id: TargetId,
        alive: Cell<bool>,
        invalidations: Cell<u32>,
        outlines: Cell<u32>,
        layouts: Cell<u32>,
        accepts_content: bool,
    }

    impl Counter {
        fn new() -> Rc<Self> {
            Self::with_content(false)
        }

        fn with_content(accepts_content: bool) -> Rc<Self> {
            Rc::new(Self {
                id: TargetId::next(),
                alive: Cell::new(true),
                invalidations: Cell::new(0),
                outlines: Cell::new(0),
                layouts: Cell::new(0),
                accepts_content,
            })
        }
    }

    impl RedrawTarget for Counter {
        fn id(&self) -> TargetId {
            self.id
        }

        fn invalidate(&self) {
            self.invalidations.set(self.invalidations.get() + 1);
        }

        fn invalidate_outline(&self) {
            self.outlines.set(self.outlines.get() + 1);
        }

        fn request_layout(&self) {
            self.layouts.set(self.layouts.get() + 1);
        }

        fn is_alive(&self) -> bool {
            self.alive.get()
        }

        fn invalidate_content(&self, _cause: &dyn Any) -> bool {
            self.accepts_content
        }
    }

    #[test]
    fn attach_rejects_duplicates() {
        let provider = MultipleViewProvider::new();
        let a = Counter::new();
        assert!(provider.attach(a.clone()));
        assert!(!provider.attach(a.clone()));
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn fan_out_reaches_every_target() {
        let provider = MultipleViewProvider::new();
        let a = Counter::new();
        let b = Counter::new();
        provider.attach(a.clone());
        provider.attach(b.clone());
        provider.invalidate();
        provider.invalidate_outline(true);
        provider.request_layout();
        for target in [&a, &b] {
            assert_eq!(target.invalidations.get(), 2);
            assert_eq!(target.outlines.get(), 1);
            assert_eq!(target.layouts.get(), 1);
        }
    }

    #[test]
    fn detach_stops_requests() {
        let provider = MultipleViewProvider::new();
        let a = Counter::new();
        let b = Counter::new();
        provider.attach(a.clone());
        provider.attach(b.clone());
        assert!(provider.detach(a.id));
        assert!(!provider.detach(a.id));
        provider.invalidate();
        assert_eq!(a.invalidations.get(), 0);
        assert_eq!(b.invalidations.get(), 1);
        assert!(!provider.belongs_to(a.id));
        assert!(provider.belongs_to(b.id));

        provider.detach_all();
        assert!(provider.is_empty());
        assert!(!provider.has_any_target());
    }

    #[test]
    fn dead_targets_are_pruned() {
        let provider = MultipleViewProvider::new();
        let a = Counter::new();
        let b = Counter::new();
        provider.attach(a.clone());
        provider.attach(b.clone());
        a.alive.set(false);
        assert_eq!(provider.len(), 2);

        provider.invalidate();
        assert_eq!(a.invalidations.get(), 0);
        assert_eq!(b.invalidations.get(), 1);
        assert_eq!(provider.len(), 1);
        assert_eq!(provider.find_any_target().map(|t| t.id()), Some(b.id));
    }

    #[test]
    fn content_falls_back_to_targets() {
        let provider = MultipleViewProvider::new();
        provider.attach(Counter::new());
        assert!(!provider.invalidate_content(&()));
        provider.attach(Counter::with_content(true));
        assert!(provider.invalidate_content(&()));
    }

    #[test]
    fn content_override_wins() {
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let provider = MultipleViewProvider::new().with_content_invalidator(move |cause: &dyn Any| {
            counter.set(counter.get() + 1);
            cause.downcast_ref::<u32>() == Some(&3)
        });
        provider.attach(Counter::with_content(true));
        assert!(provider.invalidate_content(&3u32));
        assert!(!provider.invalidate_content(&4u32));
        assert_eq!(seen.get(), 2);

        provider.set_content_invalidator(None);
        assert!(provider.invalidate_content(&4u32));
    }
}
