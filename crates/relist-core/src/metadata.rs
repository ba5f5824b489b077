#![forbid(unsafe_code)]

//! Aggregate values derived from the settled list.
//!
//! Every field animates with the same factor as the entries, so a host can
//! size its container from [`Metadata`] and stay in sync with the items
//! inside it.

use bitflags::bitflags;

use crate::animation::{Factor, InterpolatedScalar};

bitflags! {
    /// Metadata fields, used to report which ones a pass retargeted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MetadataFields: u8 {
        const SIZE            = 0b0000_0001;
        const VISIBILITY      = 0b0000_0010;
        const MAX_ITEM_WIDTH  = 0b0000_0100;
        const MAX_ITEM_HEIGHT = 0b0000_1000;
        const TOTAL_WIDTH     = 0b0001_0000;
        const TOTAL_HEIGHT    = 0b0010_0000;
        const LAST_LINE_WIDTH = 0b0100_0000;

        const LAYOUT = Self::MAX_ITEM_WIDTH.bits()
            | Self::MAX_ITEM_HEIGHT.bits()
            | Self::TOTAL_WIDTH.bits()
            | Self::TOTAL_HEIGHT.bits()
            | Self::LAST_LINE_WIDTH.bits();
    }
}

fn size_visibility(size: usize) -> f32 {
    if size > 0 { 1.0 } else { 0.0 }
}

/// Layout aggregates produced by one measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutTotals {
    pub total_width: f32,
    pub total_height: f32,
    pub max_item_width: f32,
    pub max_item_height: f32,
    pub last_line_width: f32,
}

/// Animated list aggregates.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    size: InterpolatedScalar,
    visibility: InterpolatedScalar,
    max_item_width: InterpolatedScalar,
    max_item_height: InterpolatedScalar,
    total_width: InterpolatedScalar,
    total_height: InterpolatedScalar,
    last_line_width: InterpolatedScalar,
}

impl Metadata {
    /// Animated number of settled entries.
    pub fn size(&self) -> f32 {
        self.size.get()
    }

    /// Animated list visibility: trends to 1 while the list is non-empty.
    pub fn visibility(&self) -> f32 {
        self.visibility.get()
    }

    pub fn max_item_width(&self) -> f32 {
        self.max_item_width.get()
    }

    pub fn max_item_height(&self) -> f32 {
        self.max_item_height.get()
    }

    pub fn total_width(&self) -> f32 {
        self.total_width.get()
    }

    pub fn total_height(&self) -> f32 {
        self.total_height.get()
    }

    pub fn last_line_width(&self) -> f32 {
        self.last_line_width.get()
    }

    /// Total width the running animation ends at.
    pub fn target_width(&self) -> f32 {
        self.total_width.to()
    }

    /// Target number of settled entries.
    pub fn target_size(&self) -> f32 {
        self.size.to()
    }

    pub fn previous_total_width(&self) -> f32 {
        self.total_width.from()
    }

    pub fn previous_total_height(&self) -> f32 {
        self.total_height.from()
    }

    pub fn previous_last_line_width(&self) -> f32 {
        self.last_line_width.from()
    }

    /// Size fields whose destination differs from `size`.
    pub fn size_diff(&self, size: usize) -> MetadataFields {
        let mut dirty = MetadataFields::empty();
        if self.size.differs(size as f32) {
            dirty |= MetadataFields::SIZE;
        }
        if self.visibility.differs(size_visibility(size)) {
            dirty |= MetadataFields::VISIBILITY;
        }
        dirty
    }

    /// Retarget (or snap) the size and the derived list visibility.
    pub fn set_size(&mut self, size: usize, animated: bool) -> MetadataFields {
        let size_value = size as f32;
        let visibility = size_visibility(size);
        let dirty = self.size_diff(size);
        if animated {
            self.size.set_to(size_value);
            self.visibility.set_to(visibility);
        } else {
            self.size.set(size_value);
            self.visibility.set(visibility);
        }
        dirty
    }

    /// Layout fields whose destination differs from `totals`.
    pub fn layout_diff(&self, totals: &LayoutTotals) -> MetadataFields {
        let mut dirty = MetadataFields::empty();
        for (field, value, target) in self.layout_fields_ref(totals) {
            if value.differs(target) {
                dirty |= field;
            }
        }
        dirty
    }

    /// Retarget each differing layout field, or snap all of them.
    ///
    /// Returns the fields that were retargeted; a snap reports nothing.
    pub fn retarget_layout(&mut self, totals: &LayoutTotals, animated: bool) -> MetadataFields {
        let mut dirty = MetadataFields::empty();
        for (field, value, target) in self.layout_fields_mut(totals) {
            if !animated {
                value.set(target);
            } else if value.differs(target) {
                value.set_to(target);
                dirty |= field;
            }
        }
        dirty
    }

    /// Evaluate every field. Returns whether any moved.
    pub fn apply_animation(&mut self, factor: Factor) -> bool {
        let mut changed = self.size.apply_animation(factor);
        changed |= self.max_item_width.apply_animation(factor);
        changed |= self.max_item_height.apply_animation(factor);
        changed |= self.total_width.apply_animation(factor);
        changed |= self.last_line_width.apply_animation(factor);
        changed |= self.total_height.apply_animation(factor);
        changed |= self.visibility.apply_animation(factor);
        changed
    }

    /// Finalize every field.
    pub fn finish_animation(&mut self, commit: bool) {
        self.size.finish_animation(commit);
        self.max_item_width.finish_animation(commit);
        self.max_item_height.finish_animation(commit);
        self.total_width.finish_animation(commit);
        self.last_line_width.finish_animation(commit);
        self.total_height.finish_animation(commit);
        self.visibility.finish_animation(commit);
    }

    fn layout_fields_ref(
        &self,
        totals: &LayoutTotals,
    ) -> [(MetadataFields, &InterpolatedScalar, f32); 5] {
        [
            (MetadataFields::TOTAL_WIDTH, &self.total_width, totals.total_width),
            (
                MetadataFields::LAST_LINE_WIDTH,
                &self.last_line_width,
                totals.last_line_width,
            ),
            (MetadataFields::TOTAL_HEIGHT, &self.total_height, totals.total_height),
            (
                MetadataFields::MAX_ITEM_WIDTH,
                &self.max_item_width,
                totals.max_item_width,
            ),
            (
                MetadataFields::MAX_ITEM_HEIGHT,
                &self.max_item_height,
                totals.max_item_height,
            ),
        ]
    }

    fn layout_fields_mut(
        &mut self,
        totals: &LayoutTotals,
    ) -> [(MetadataFields, &mut InterpolatedScalar, f32); 5] {
        [
            (
                MetadataFields::TOTAL_WIDTH,
                &mut self.total_width,
                totals.total_width,
            ),
            (
                MetadataFields::LAST_LINE_WIDTH,
                &mut self.last_line_width,
                totals.last_line_width,
            ),
            (
                MetadataFields::TOTAL_HEIGHT,
                &mut self.total_height,
                totals.total_height,
            ),
            (
                MetadataFields::MAX_ITEM_WIDTH,
                &mut self.max_item_width,
                totals.max_item_width,
            ),
            (
                MetadataFields::MAX_ITEM_HEIGHT,
                &mut self.max_item_height,
                totals.max_item_height,
            ),
        ]
    }
}
