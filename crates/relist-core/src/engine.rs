#![forbid(unsafe_code)]

//! The list reconciliation engine.
//!
//! [`ListAnimator`] keeps one [`Entry`] per distinct item. Each
//! [`reconcile`](ListAnimator::reconcile) diffs a new target against the
//! entries it already holds, retargets what changed, and lets a single
//! factor carry every entry and the [`Metadata`] from the old state to the
//! new one. Entries that left the target fade out and are evicted when the
//! transition settles.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──reconcile──► ChangePending ──commit──► Animating ──factor 1──► Settling ──► Idle
//!                           ▲                        │
//!                           └──────reconcile─────────┘   (frozen, then retargeted)
//! ```
//!
//! # Invariants
//!
//! 1. `order` holds every live entry, sorted by index (stable).
//! 2. `settled` holds exactly the entries affecting layout, sorted by
//!    strictly increasing index.
//! 3. Entries are evicted only while settling (or by a non-animated
//!    reconcile), and each evicted item is destroyed exactly once.
//! 4. An interrupted transition is frozen at its current visual state and
//!    continues from there; it never restarts from its old origin.
//!
//! # Failure Modes
//!
//! - A settled entry that cannot be found during removal, or two settled
//!   entries sharing an index, panics: both mean the bookkeeping is corrupt.

use std::fmt;
use std::time::Duration;

use crate::animation::{Factor, FactorDriver, FactorEvent};
use crate::capability::{CoordsMode, ListItem};
use crate::config::AnimatorConfig;
use crate::entry::{Entry, EntryId};
use crate::geometry::RectF;
use crate::metadata::{LayoutTotals, Metadata, MetadataFields};

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Receives a notification whenever the animated state moved.
pub trait ChangeSink {
    fn on_items_changed(&mut self);
}

impl<F: FnMut()> ChangeSink for F {
    fn on_items_changed(&mut self) {
        self()
    }
}

/// Per-item membership notifications from an animated reconcile.
pub trait ResetCallback<T> {
    /// `item` entered the settled list. `returning` is true when an entry
    /// that was fading out was brought back.
    fn on_item_added(&mut self, item: &T, returning: bool) {
        let _ = (item, returning);
    }

    /// `item` left the settled list and starts fading out.
    fn on_item_removed(&mut self, item: &T) {
        let _ = item;
    }
}

impl<T> ResetCallback<T> for () {}

/// Where the engine is in its transition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimatorPhase {
    /// Everything is at rest.
    #[default]
    Idle,
    /// A reconcile or measurement is retargeting values.
    ChangePending,
    /// Values are travelling toward their targets.
    Animating,
    /// The transition is being finalized and junk evicted.
    Settling,
}

/// Counts reported by one reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileSummary {
    /// Items that got a new entry.
    pub added: usize,
    /// Fading entries brought back.
    pub returning: usize,
    /// Entries that started fading out.
    pub removed: usize,
    /// Whether the reconcile did anything at all.
    pub changed: bool,
    /// Metadata fields retargeted toward new values. Empty after a
    /// non-animated reconcile, which snaps instead.
    pub metadata: MetadataFields,
}

// ---------------------------------------------------------------------------
// Arena
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

/// Slot storage for entries, recycling freed slots.
#[derive(Debug)]
struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
}

impl<T> Arena<T> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    fn alloc(&mut self, make: impl FnOnce(EntryId) -> Entry<T>) -> EntryId {
        let id = match self.free_list.pop() {
            Some(slot) => EntryId::new(slot, self.slots[slot as usize].generation),
            None => {
                let Ok(slot) = u32::try_from(self.slots.len()) else {
                    panic!("entry arena exhausted");
                };
                self.slots.push(Slot {
                    generation: 0,
                    entry: None,
                });
                EntryId::new(slot, 0)
            }
        };
        self.slots[id.slot() as usize].entry = Some(make(id));
        id
    }

    fn release(&mut self, id: EntryId) -> Option<Entry<T>> {
        let slot = self.slots.get_mut(id.slot() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.slot());
        Some(entry)
    }

    fn try_get(&self, id: EntryId) -> Option<&Entry<T>> {
        let slot = self.slots.get(id.slot() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entry.as_ref()
    }

    fn get(&self, id: EntryId) -> &Entry<T> {
        match self.try_get(id) {
            Some(entry) => entry,
            None => panic!("dangling entry handle {id:?}"),
        }
    }

    fn get_mut(&mut self, id: EntryId) -> &mut Entry<T> {
        let live = self
            .slots
            .get_mut(id.slot() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.entry.as_mut());
        match live {
            Some(entry) => entry,
            None => panic!("dangling entry handle {id:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// ListAnimator
// ---------------------------------------------------------------------------

/// Where the measurement pass placed one settled entry.
struct Placement {
    id: EntryId,
    rect: RectF,
    spacing_start: f32,
    animate: bool,
}

/// Animated, reconciled list of `T`.
pub struct ListAnimator<T> {
    arena: Arena<T>,
    order: Vec<EntryId>,
    settled: Vec<EntryId>,
    metadata: Metadata,
    sink: Box<dyn ChangeSink>,
    driver: Option<Box<dyn FactorDriver>>,
    phase: AnimatorPhase,
    found_changes: bool,
}

impl<T> fmt::Debug for ListAnimator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListAnimator")
            .field("len", &self.order.len())
            .field("settled", &self.settled.len())
            .field("phase", &self.phase)
            .field("driven", &self.driver.is_some())
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl<T: ListItem> ListAnimator<T> {
    /// Engine without a driver: the host calls
    /// [`apply_animation`](Self::apply_animation) itself.
    ///
    /// Animated reconciles do not snap here. They retarget values and stay
    /// [`Animating`](AnimatorPhase::Animating) until the host applies
    /// [`Factor::END`], and removed entries are evicted only then. Use
    /// `reconcile(.., false)` to snap, or [`from_config`](Self::from_config)
    /// to pick a driver from configuration.
    #[must_use]
    pub fn new(sink: impl ChangeSink + 'static) -> Self {
        Self {
            arena: Arena::new(),
            order: Vec::new(),
            settled: Vec::new(),
            metadata: Metadata::default(),
            sink: Box::new(sink),
            driver: None,
            phase: AnimatorPhase::Idle,
            found_changes: false,
        }
    }

    /// Engine advanced by `driver` through [`tick`](Self::tick).
    #[must_use]
    pub fn with_driver(
        sink: impl ChangeSink + 'static,
        driver: impl FactorDriver + 'static,
    ) -> Self {
        let mut animator = Self::new(sink);
        animator.driver = Some(Box::new(driver));
        animator
    }

    /// Engine using the stock driver when `config` is animated.
    #[must_use]
    pub fn from_config(sink: impl ChangeSink + 'static, config: &AnimatorConfig) -> Self {
        match config.build_driver() {
            Some(driver) => Self::with_driver(sink, driver),
            None => Self::new(sink),
        }
    }

    // -- Read access --------------------------------------------------------

    /// Number of live entries, including ones fading out.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of entries affecting layout.
    pub fn settled_len(&self) -> usize {
        self.settled.len()
    }

    /// All live entries by index.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            ids: self.order.iter(),
        }
    }

    /// Entries affecting layout, by index.
    pub fn settled(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            ids: self.settled.iter(),
        }
    }

    /// Look up an entry by handle. `None` once it was evicted.
    pub fn entry(&self, id: EntryId) -> Option<&Entry<T>> {
        self.arena.try_get(id)
    }

    /// The `position`th live entry.
    pub fn entry_at(&self, position: usize) -> Option<&Entry<T>> {
        self.order.get(position).map(|id| self.arena.get(*id))
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == AnimatorPhase::Animating
    }

    /// Whether a driver is attached.
    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }

    /// Whether the settled items equal `items`, in order.
    pub fn compare_contents(&self, items: &[T]) -> bool {
        self.settled.len() == items.len()
            && self
                .settled
                .iter()
                .zip(items)
                .all(|(id, item)| self.arena.get(*id).item() == item)
    }

    // -- Reconcile ----------------------------------------------------------

    /// Reconcile against `target` without membership callbacks.
    pub fn reconcile(&mut self, target: Vec<T>, animated: bool) -> ReconcileSummary {
        self.reconcile_with(target, animated, &mut ())
    }

    /// Reconcile against `target`.
    ///
    /// Non-animated: every entry is destroyed and rebuilt fully visible.
    /// Animated: entries are matched by equality, retargeted, and the
    /// transition starts (or continues from where it was frozen).
    pub fn reconcile_with<C>(
        &mut self,
        target: Vec<T>,
        animated: bool,
        callback: &mut C,
    ) -> ReconcileSummary
    where
        C: ResetCallback<T> + ?Sized,
    {
        let _span = crate::debug_span!("reconcile", target_len = target.len(), animated).entered();
        let target = first_occurrences(target);

        if !animated {
            return self.rebuild(target);
        }
        if self.compare_contents(&target) {
            return ReconcileSummary::default();
        }

        let mut summary = ReconcileSummary {
            changed: true,
            metadata: self.before_change(),
            ..ReconcileSummary::default()
        };
        let mut need_sort = false;
        let mut need_sort_settled = false;
        let mut claimed = vec![false; target.len()];

        // Existing entries: keep, move, bring back, or fade out.
        for pos in 0..self.order.len() {
            let id = self.order[pos];
            let found = {
                let item = self.arena.get(id).item();
                target.iter().position(|candidate| candidate == item)
            };
            match found {
                Some(new_index) => {
                    claimed[new_index] = true;
                    let entry = self.arena.get_mut(id);
                    entry.position.set_to(new_index as f32);
                    if entry.index != new_index {
                        entry.index = new_index;
                        need_sort = true;
                        need_sort_settled |= entry.is_affecting_layout();
                    }
                    if !entry.is_affecting_layout() {
                        entry.begin_appearance();
                        self.settled.push(id);
                        need_sort_settled = true;
                        summary.metadata |= self.metadata.set_size(self.settled.len(), true);
                        callback.on_item_added(self.arena.get(id).item(), true);
                        summary.returning += 1;
                    }
                }
                None => {
                    let entry = self.arena.get_mut(id);
                    if entry.is_affecting_layout() {
                        entry.begin_removal();
                        self.remove_settled(id, need_sort_settled);
                        summary.metadata |= self.metadata.set_size(self.settled.len(), true);
                        callback.on_item_removed(self.arena.get(id).item());
                        summary.removed += 1;
                    }
                }
            }
        }

        if need_sort_settled {
            let arena = &self.arena;
            self.settled.sort_by_key(|id| arena.get(*id).index);
        }

        // New items.
        for (index, item) in target.into_iter().enumerate() {
            if claimed[index] {
                continue;
            }
            if index != self.order.len() {
                need_sort = true;
            }
            let id = self.arena.alloc(|id| Entry::appearing(item, id, index));
            self.order.push(id);
            let at = {
                let arena = &self.arena;
                self.settled
                    .partition_point(|settled| arena.get(*settled).index <= index)
            };
            self.settled.insert(at, id);
            summary.metadata |= self.metadata.set_size(self.settled.len(), true);
            callback.on_item_added(self.arena.get(id).item(), false);
            summary.added += 1;
        }

        if need_sort {
            let arena = &self.arena;
            self.order.sort_by_key(|id| arena.get(*id).index);
        }
        self.check_settled_order();

        summary.metadata |= self.measure_pass(true);
        crate::debug!(
            added = summary.added,
            returning = summary.returning,
            removed = summary.removed,
            metadata = ?summary.metadata,
            "reconcile applied"
        );
        self.commit();
        summary
    }

    /// Reconcile against an empty target.
    pub fn clear(&mut self, animated: bool) -> ReconcileSummary {
        self.reconcile(Vec::new(), animated)
    }

    /// Re-run measurement after items changed size or content.
    ///
    /// Non-animated measurement first lands any running transition. Animated
    /// measurement also resumes values left short of their targets by
    /// [`stop_animation(false)`](Self::stop_animation).
    ///
    /// Returns the metadata fields that were retargeted; a non-animated
    /// measurement snaps and reports nothing.
    pub fn measure(&mut self, animated: bool) -> MetadataFields {
        if !animated {
            self.stop_animation(true);
        }
        let retargeted = self.measure_pass(animated);
        if animated {
            self.commit();
        }
        retargeted
    }

    // -- Animation ----------------------------------------------------------

    /// Evaluate every entry and the metadata at `factor`.
    ///
    /// Notifies the sink if anything moved. Factor `1` settles the
    /// transition and evicts faded-out entries. Returns whether anything
    /// moved.
    pub fn apply_animation(&mut self, factor: Factor) -> bool {
        let mut changed = self.metadata.apply_animation(factor);
        for id in &self.order {
            changed |= self.arena.get_mut(*id).apply_animation(factor);
        }
        if changed {
            self.sink.on_items_changed();
        }
        if factor.is_end() {
            self.settle(true);
        }
        changed
    }

    /// Advance the attached driver by `dt` and apply what it reports.
    ///
    /// Returns whether anything moved. Without a driver this does nothing.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let events = match self.driver.as_mut() {
            Some(driver) => {
                driver.tick(dt);
                driver.drain_events()
            }
            None => return false,
        };
        let mut changed = false;
        for event in events {
            match event {
                FactorEvent::Changed(value) | FactorEvent::Finished(value) => {
                    changed |= self.apply_animation(Factor::new(value));
                }
            }
        }
        changed
    }

    /// Stop the running transition.
    ///
    /// `commit` lands every value on its target; otherwise values freeze
    /// where they are. Either way faded-out entries are evicted and the
    /// driver is reset to factor 0.
    pub fn stop_animation(&mut self, commit: bool) {
        if let Some(driver) = self.driver.as_mut() {
            driver.cancel();
        }
        self.settle(commit);
        if let Some(driver) = self.driver.as_mut() {
            driver.force_factor(0.0);
            driver.drain_events();
        }
    }

    // -- Internals ----------------------------------------------------------

    /// Non-animated reconcile: tear everything down and rebuild.
    fn rebuild(&mut self, target: Vec<T>) -> ReconcileSummary {
        self.stop_animation(false);
        let previous = std::mem::take(&mut self.order);
        self.settled.clear();
        for id in previous.into_iter().rev() {
            if let Some(entry) = self.arena.release(id) {
                entry.recycle();
            }
        }

        let mut summary = ReconcileSummary {
            changed: true,
            ..ReconcileSummary::default()
        };
        for (index, item) in target.into_iter().enumerate() {
            let id = self.arena.alloc(|id| Entry::visible(item, id, index));
            self.order.push(id);
            self.settled.push(id);
            summary.added += 1;
        }

        self.metadata.set_size(self.settled.len(), false);
        self.measure_pass(false);
        self.phase = AnimatorPhase::Idle;
        crate::debug!(added = summary.added, "list rebuilt");
        self.sink.on_items_changed();
        summary
    }

    /// Freeze the running transition the first time a pass finds a change,
    /// then point every lifecycle value back at its target. Returns the
    /// metadata fields that had to be retargeted.
    fn before_change(&mut self) -> MetadataFields {
        if self.found_changes {
            return MetadataFields::empty();
        }
        self.found_changes = true;
        self.stop_animation(false);
        for id in &self.order {
            self.arena.get_mut(*id).rearm();
        }
        self.phase = AnimatorPhase::ChangePending;
        self.metadata.set_size(self.settled.len(), true)
    }

    /// Start the transition for whatever the last pass retargeted.
    fn commit(&mut self) {
        if self.found_changes {
            self.found_changes = false;
            if let Some(driver) = self.driver.as_mut() {
                driver.animate_to(1.0);
            }
            self.phase = AnimatorPhase::Animating;
            crate::trace!(driven = self.driver.is_some(), "transition committed");
        } else if self.driver.is_none() {
            for id in &self.order {
                self.arena.get_mut(*id).rebase();
            }
        }
    }

    /// Finish every value and evict junk. Returns the number evicted.
    fn settle(&mut self, commit: bool) -> usize {
        self.phase = AnimatorPhase::Settling;
        let before = self.order.len();
        for pos in (0..self.order.len()).rev() {
            let id = self.order[pos];
            let entry = self.arena.get_mut(id);
            entry.finish_animation(commit);
            if entry.is_junk() {
                self.order.remove(pos);
                if let Some(entry) = self.arena.release(id) {
                    entry.recycle();
                }
            }
        }
        self.metadata.finish_animation(commit);
        self.phase = AnimatorPhase::Idle;
        let evicted = before - self.order.len();
        crate::trace!(evicted, commit, "transition settled");
        evicted
    }

    fn remove_settled(&mut self, id: EntryId, unsorted: bool) {
        let found = if unsorted {
            self.settled.iter().position(|settled| *settled == id)
        } else {
            let index = self.arena.get(id).index;
            self.settled
                .binary_search_by_key(&index, |settled| self.arena.get(*settled).index)
                .ok()
                .filter(|&pos| self.settled[pos] == id)
        };
        match found {
            Some(pos) => {
                self.settled.remove(pos);
            }
            None => panic!("entry {id:?} is missing from the settled list"),
        }
    }

    fn check_settled_order(&self) {
        for pair in self.settled.windows(2) {
            let (a, b) = (self.arena.get(pair[0]), self.arena.get(pair[1]));
            assert!(
                a.index < b.index,
                "settled entries {:?} and {:?} share index {}",
                a.id(),
                b.id(),
                b.index
            );
        }
    }

    /// Lay out the settled entries and retarget (or snap) their rectangles,
    /// item-owned state, and the layout metadata.
    fn measure_pass(&mut self, animated: bool) -> MetadataFields {
        let count = self.settled.len();
        let mut totals = LayoutTotals::default();
        let mut max_top = -1.0f32;
        let mut placements = Vec::with_capacity(count);
        let mut differs = false;
        let mut retargeted = MetadataFields::empty();

        for id in &self.settled {
            let entry = self.arena.get(*id);
            let Some(measurable) = entry.item().as_measurable() else {
                continue;
            };
            let is_first = entry.index == 0;
            let is_last = entry.index + 1 == count;
            let spacing_start = measurable.spacing_start(is_first);
            let spacing_end = measurable.spacing_end(is_last);
            let item_width = measurable.width();
            let item_height = measurable.height();
            let width = spacing_start + item_width + spacing_end;
            let height = spacing_start + item_height + spacing_end;

            let rect = match measurable.coords() {
                CoordsMode::Absolute => {
                    let left = measurable.x();
                    let top = measurable.y();
                    let rect = RectF::new(left, top, left + width, top + height);
                    totals.total_width = totals.total_width.max(rect.right);
                    totals.total_height = totals.total_height.max(rect.bottom);
                    rect
                }
                CoordsMode::Flow => {
                    let left = totals.total_width;
                    let top = totals.total_height;
                    totals.total_width += width;
                    totals.total_height += height;
                    RectF::new(left, top, totals.total_width, totals.total_height)
                }
            };

            if rect.top == max_top {
                totals.last_line_width = totals.last_line_width.max(rect.right);
            } else if rect.top > max_top {
                totals.last_line_width = width;
                max_top = rect.top;
            }
            totals.max_item_width = totals.max_item_width.max(item_width);
            totals.max_item_height = totals.max_item_height.max(item_height);

            let animate = animated && entry.visibility() > 0.0;
            if animate {
                differs |= entry
                    .rect
                    .differs(rect.left, rect.top, rect.right, rect.bottom)
                    || entry.spacing_start.differs(spacing_start);
            }
            placements.push(Placement {
                id: *id,
                rect,
                spacing_start,
                animate,
            });
        }

        if animated {
            differs |= !self.metadata.layout_diff(&totals).is_empty();
            differs |= !self.metadata.size_diff(count).is_empty();
            for id in &self.order {
                let entry = self.arena.get_mut(*id);
                differs |= entry.is_off_target();
                if let Some(animatable) = entry.item_mut().as_animatable() {
                    differs |= animatable.has_changes();
                }
            }
            if differs {
                retargeted |= self.before_change();
            }
        }

        for placement in &placements {
            let entry = self.arena.get_mut(placement.id);
            let RectF {
                left,
                top,
                right,
                bottom,
            } = placement.rect;
            if placement.animate {
                entry.rect.set_to(left, top, right, bottom);
                entry.spacing_start.set_to(placement.spacing_start);
            } else {
                entry.rect.set(left, top, right, bottom);
                entry.spacing_start.set(placement.spacing_start);
            }
        }

        for id in &self.order {
            if let Some(animatable) = self.arena.get_mut(*id).item_mut().as_animatable() {
                if !animated {
                    animatable.apply_changes();
                } else if animatable.has_changes() {
                    animatable.prepare_changes();
                }
            }
        }

        retargeted | self.metadata.retarget_layout(&totals, animated)
    }
}

/// Keep the first of every run of equal items, preserving order. Indices
/// into the result are dense.
fn first_occurrences<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Iteration
// ---------------------------------------------------------------------------

/// Iterator over entries in index order.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    arena: &'a Arena<T>,
    ids: std::slice::Iter<'a, EntryId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Entry<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        Some(self.arena.get(*id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.ids.next_back()?;
        Some(self.arena.get(*id))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T: ListItem> IntoIterator for &'a ListAnimator<T> {
    type Item = &'a Entry<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FactorAnimator;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<usize>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let sink = {
            let count = Rc::clone(&count);
            move || count.set(count.get() + 1)
        };
        (count, sink)
    }

    fn items(animator: &ListAnimator<char>) -> Vec<char> {
        animator.iter().map(|e| *e.item()).collect()
    }

    #[test]
    fn rebuild_notifies_once() {
        let (count, sink) = counter();
        let mut animator = ListAnimator::new(sink);
        let summary = animator.reconcile(vec!['a', 'b'], false);
        assert_eq!(summary.added, 2);
        assert_eq!(count.get(), 1);
        assert_eq!(items(&animator), vec!['a', 'b']);
        assert_eq!(animator.metadata().size(), 2.0);
        assert_eq!(animator.phase(), AnimatorPhase::Idle);
    }

    #[test]
    fn rebuild_collapses_duplicates() {
        let mut animator = ListAnimator::new(|| {});
        animator.reconcile(vec!['a', 'a', 'b'], false);
        assert_eq!(animator.len(), 2);
        assert_eq!(animator.entry_at(1).map(Entry::index), Some(1));
    }

    #[test]
    fn animated_duplicates_get_dense_indices() {
        let mut animator = ListAnimator::new(|| {});
        animator.reconcile(vec!['a'], false);
        let summary = animator.reconcile(vec!['b', 'a', 'b', 'c'], true);
        assert_eq!(summary.added, 2);
        let indices: Vec<usize> = animator.settled().map(Entry::index).collect();
        assert_eq!(indices, [0, 1, 2]);
        let items: Vec<char> = animator.settled().map(|e| *e.item()).collect();
        assert_eq!(items, ['b', 'a', 'c']);
    }

    #[test]
    fn summary_reports_retargeted_metadata() {
        let mut animator = ListAnimator::new(|| {});
        let first = animator.reconcile(vec!['a'], true);
        assert_eq!(
            first.metadata,
            MetadataFields::SIZE | MetadataFields::VISIBILITY
        );
        animator.apply_animation(Factor::END);

        let grown = animator.reconcile(vec!['a', 'b'], true);
        assert_eq!(grown.metadata, MetadataFields::SIZE);
        animator.apply_animation(Factor::END);

        let rebuilt = animator.reconcile(vec!['c'], false);
        assert!(rebuilt.metadata.is_empty());
        assert!(animator.measure(true).is_empty());
    }

    #[test]
    fn driverless_removal_waits_for_host_factor() {
        let mut animator = ListAnimator::new(|| {});
        animator.reconcile(vec!['a', 'b'], false);
        animator.reconcile(vec!['b'], true);
        assert!(animator.is_animating());
        assert_eq!(animator.len(), 2);
        assert_eq!(animator.settled_len(), 1);

        animator.apply_animation(Factor::new(0.5));
        assert_eq!(animator.len(), 2);
        animator.apply_animation(Factor::END);
        assert_eq!(animator.phase(), AnimatorPhase::Idle);
        assert_eq!(items(&animator), ['b']);
    }

    #[test]
    fn duplicated_equal_target_is_noop() {
        let mut animator = ListAnimator::new(|| {});
        animator.reconcile(vec!['a', 'b'], false);
        let summary = animator.reconcile(vec!['a', 'b', 'a'], true);
        assert!(!summary.changed);
        assert_eq!(animator.phase(), AnimatorPhase::Idle);
    }

    #[test]
    fn equal_target_is_noop() {
        let (count, sink) = counter();
        let mut animator = ListAnimator::new(sink);
        animator.reconcile(vec!['a', 'b'], false);
        let summary = animator.reconcile(vec!['a', 'b'], true);
        assert!(!summary.changed);
        assert_eq!(count.get(), 1);
        assert_eq!(animator.phase(), AnimatorPhase::Idle);
    }

    #[test]
    fn compare_contents_on_empty() {
        let animator: ListAnimator<char> = ListAnimator::new(|| {});
        assert!(animator.compare_contents(&[]));
        assert!(!animator.compare_contents(&['a']));
    }

    #[test]
    fn undriven_reconcile_waits_for_host() {
        let mut animator = ListAnimator::new(|| {});
        animator.reconcile(vec!['a'], true);
        assert!(animator.is_animating());
        assert_eq!(animator.entry_at(0).map(Entry::visibility), Some(0.0));

        assert!(animator.apply_animation(Factor::new(0.5)));
        assert_eq!(animator.entry_at(0).map(Entry::visibility), Some(0.5));

        animator.apply_animation(Factor::END);
        assert_eq!(animator.phase(), AnimatorPhase::Idle);
        assert_eq!(animator.entry_at(0).map(Entry::visibility), Some(1.0));
    }

    #[test]
    fn tick_without_driver_does_nothing() {
        let mut animator = ListAnimator::new(|| {});
        animator.reconcile(vec!['a'], true);
        assert!(!animator.tick(Duration::from_millis(16)));
    }

    #[test]
    fn driver_carries_transition_to_rest() {
        let (count, sink) = counter();
        let driver = FactorAnimator::new(Duration::from_millis(100));
        let mut animator = ListAnimator::with_driver(sink, driver);
        animator.reconcile(vec!['a', 'b'], true);
        assert!(animator.is_animating());

        assert!(animator.tick(Duration::from_millis(50)));
        assert!(animator.is_animating());
        animator.tick(Duration::from_millis(50));
        assert_eq!(animator.phase(), AnimatorPhase::Idle);
        assert!(animator.iter().all(|e| e.visibility() == 1.0));
        assert!(count.get() >= 2);
    }

    #[test]
    fn from_config_picks_driver() {
        let animated: ListAnimator<char> = ListAnimator::from_config(
            || {},
            &AnimatorConfig::animated(Duration::from_millis(10)),
        );
        assert!(animated.has_driver());
        let instant: ListAnimator<char> =
            ListAnimator::from_config(|| {}, &AnimatorConfig::default());
        assert!(!instant.has_driver());
    }

    #[test]
    fn stale_handle_does_not_resolve() {
        let mut animator = ListAnimator::new(|| {});
        animator.reconcile(vec!['a'], false);
        let old = animator.entry_at(0).map(Entry::id).unwrap();
        animator.reconcile(vec!['b'], false);
        assert!(animator.entry(old).is_none());
        let new = animator.entry_at(0).map(Entry::id).unwrap();
        assert_eq!(new.slot(), old.slot());
        assert_ne!(new, old);
    }

    #[test]
    fn settled_iter_skips_fading_entries() {
        let mut animator = ListAnimator::new(|| {});
        animator.reconcile(vec!['a', 'b'], false);
        animator.reconcile(vec!['b'], true);
        assert_eq!(animator.len(), 2);
        let settled: Vec<char> = animator.settled().map(|e| *e.item()).collect();
        assert_eq!(settled, vec!['b']);
        assert_eq!(animator.settled().len(), 1);
    }

    #[test]
    fn debug_output_names_phase() {
        let animator: ListAnimator<char> = ListAnimator::new(|| {});
        assert!(format!("{animator:?}").contains("Idle"));
    }
}
