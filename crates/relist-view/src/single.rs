#![forbid(unsafe_code)]

//! Provider serving at most one redraw target.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use relist_core::geometry::RectF;

use crate::provider::{RedrawTarget, TargetId, ViewProvider};

/// Forwards every request to its one target, when set.
///
/// The target can be swapped at any time; requests made while it is unset
/// are dropped.
#[derive(Default)]
pub struct SingleViewProvider {
    target: RefCell<Option<Rc<dyn RedrawTarget>>>,
}

impl fmt::Debug for SingleViewProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleViewProvider")
            .field("target", &self.target.borrow().as_ref().map(|t| t.id()))
            .finish()
    }
}

impl SingleViewProvider {
    #[must_use]
    pub fn new(target: Rc<dyn RedrawTarget>) -> Self {
        Self {
            target: RefCell::new(Some(target)),
        }
    }

    /// Provider with no target yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the target, returning the previous one.
    pub fn set_target(
        &self,
        target: Option<Rc<dyn RedrawTarget>>,
    ) -> Option<Rc<dyn RedrawTarget>> {
        self.target.replace(target)
    }

    /// The target, without checking whether it is alive.
    #[must_use]
    pub fn target(&self) -> Option<Rc<dyn RedrawTarget>> {
        self.target.borrow().clone()
    }

    fn with_target(&self, f: impl FnOnce(&dyn RedrawTarget)) {
        if let Some(target) = self.find_any_target() {
            f(target.as_ref());
        }
    }
}

impl ViewProvider for SingleViewProvider {
    fn has_any_target(&self) -> bool {
        self.find_any_target().is_some()
    }

    fn belongs_to(&self, id: TargetId) -> bool {
        self.target.borrow().as_ref().is_some_and(|t| t.id() == id)
    }

    fn find_any_target(&self) -> Option<Rc<dyn RedrawTarget>> {
        self.target().filter(|t| t.is_alive())
    }

    fn invalidate(&self) {
        self.with_target(|t| t.invalidate());
    }

    fn invalidate_rect(&self, dirty: RectF) {
        self.with_target(|t| t.invalidate_rect(dirty));
    }

    fn invalidate_parent(&self) {
        self.with_target(|t| t.invalidate_parent());
    }

    fn invalidate_parent_rect(&self, dirty: RectF) {
        self.with_target(|t| t.invalidate_parent_rect(dirty));
    }

    fn invalidate_outline(&self, with_invalidate: bool) {
        self.with_target(|t| {
            t.invalidate_outline();
            if with_invalidate {
                t.invalidate();
            }
        });
    }

    fn request_layout(&self) {
        self.with_target(|t| t.request_layout());
    }

    /// A single target never refreshes content on the provider's behalf.
    fn invalidate_content(&self, _cause: &dyn Any) -> bool {
        false
    }
}
