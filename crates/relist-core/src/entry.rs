#![forbid(unsafe_code)]

//! Per-item animated state.
//!
//! An [`Entry`] wraps one item for its whole life in the list: created when
//! the item first appears, mutated in place by every later reconcile, and
//! destroyed once it has fully faded out.
//!
//! # Invariants
//!
//! 1. An entry is *junk* iff its visibility reads `0` and it is being
//!    removed. Only junk entries are evicted.
//! 2. An entry stops affecting layout the instant removal begins, even though
//!    it stays visible while fading out.

use crate::animation::{Factor, InterpolatedRect, InterpolatedScalar};
use crate::capability::ListItem;
use crate::geometry::RectF;

/// Stable handle to one [`Entry`] for as long as it lives.
///
/// A handle to an evicted entry never resolves to a later entry that reuses
/// the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId {
    slot: u32,
    generation: u32,
}

impl EntryId {
    pub(crate) const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Arena slot index.
    #[inline]
    pub const fn slot(self) -> u32 {
        self.slot
    }

    /// Generation of the slot when this handle was issued.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// One item plus its animated presentation state.
#[derive(Debug)]
pub struct Entry<T> {
    item: T,
    id: EntryId,
    pub(crate) index: usize,
    pub(crate) position: InterpolatedScalar,
    pub(crate) visibility: InterpolatedScalar,
    pub(crate) rect: InterpolatedRect,
    pub(crate) spacing_start: InterpolatedScalar,
    removing: bool,
}

impl<T> Entry<T> {
    /// Create a fully visible entry.
    pub(crate) fn visible(item: T, id: EntryId, index: usize) -> Self {
        Self::with_visibility(item, id, index, 1.0)
    }

    /// Create an entry at visibility 0, already animating toward 1.
    pub(crate) fn appearing(item: T, id: EntryId, index: usize) -> Self {
        let mut entry = Self::with_visibility(item, id, index, 0.0);
        entry.begin_appearance();
        entry
    }

    fn with_visibility(item: T, id: EntryId, index: usize, visibility: f32) -> Self {
        Self {
            item,
            id,
            index,
            position: InterpolatedScalar::new(index as f32),
            visibility: InterpolatedScalar::new(visibility),
            rect: InterpolatedRect::default(),
            spacing_start: InterpolatedScalar::new(0.0),
            removing: false,
        }
    }

    /// Stable handle.
    #[inline]
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The wrapped item.
    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Animated ordinal position.
    #[inline]
    pub fn position(&self) -> f32 {
        self.position.get()
    }

    /// Ordinal in the most recent target.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Visibility clamped to `[0, 1]`.
    #[inline]
    pub fn visibility(&self) -> f32 {
        self.visibility.get().clamp(0.0, 1.0)
    }

    /// Measured rectangle, as currently animated.
    #[inline]
    pub fn rect(&self) -> RectF {
        self.rect.rect()
    }

    /// Measured leading spacing, as currently animated.
    #[inline]
    pub fn spacing_start(&self) -> f32 {
        self.spacing_start.get()
    }

    /// Whether the entry takes part in layout.
    #[inline]
    pub fn is_affecting_layout(&self) -> bool {
        !self.removing
    }

    /// Whether the entry has faded out and is waiting for eviction.
    #[inline]
    pub fn is_junk(&self) -> bool {
        self.visibility() == 0.0 && self.removing
    }

    pub(crate) fn begin_removal(&mut self) {
        self.visibility.set_to(0.0);
        self.removing = true;
    }

    pub(crate) fn begin_appearance(&mut self) {
        self.visibility.set_to(1.0);
        self.removing = false;
    }

    fn lifecycle_visibility(&self) -> f32 {
        if self.removing { 0.0 } else { 1.0 }
    }

    /// Whether visibility or position is headed somewhere other than its
    /// lifecycle target, as after a frozen stop.
    pub(crate) fn is_off_target(&self) -> bool {
        self.visibility.differs(self.lifecycle_visibility())
            || self.position.differs(self.index as f32)
    }

    /// Point visibility and position back at their lifecycle targets after
    /// the running animation was frozen.
    pub(crate) fn rearm(&mut self) {
        self.visibility.set_to(self.lifecycle_visibility());
        self.position.set_to(self.index as f32);
    }

    /// Move the running legs of visibility and position to their current
    /// values.
    pub(crate) fn rebase(&mut self) {
        self.visibility.rebase();
        self.position.rebase();
    }
}

impl<T: ListItem> Entry<T> {
    pub(crate) fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    pub(crate) fn apply_animation(&mut self, factor: Factor) -> bool {
        let mut changed = self.position.apply_animation(factor);
        changed |= self.visibility.apply_animation(factor);
        changed |= self.rect.apply_animation(factor);
        changed |= self.spacing_start.apply_animation(factor);
        if let Some(animatable) = self.item.as_animatable() {
            changed |= animatable.apply_animation(factor);
        }
        changed
    }

    pub(crate) fn finish_animation(&mut self, commit: bool) {
        self.position.finish_animation(commit);
        self.visibility.finish_animation(commit);
        self.rect.finish_animation(commit);
        self.spacing_start.finish_animation(commit);
        if let Some(animatable) = self.item.as_animatable() {
            animatable.finish_animation(commit);
        }
    }

    /// Run the item's teardown and drop the entry.
    pub(crate) fn recycle(mut self) {
        if let Some(destroyable) = self.item.as_destroyable() {
            destroyable.destroy();
        }
    }
}
