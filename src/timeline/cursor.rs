use tracing::debug;

use crate::state::data::MediaItem;

use super::index::{flat_index_of, SectionIndex};
use super::section::Section;

/// Position of the full-screen item: a section and a flattened item index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorPosition {
    pub section: usize,
    pub item: usize,
}

impl CursorPosition {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Pointer over the flattened section/item sequence of the detail view.
///
/// The cursor does not own the sections; every call takes the live
/// snapshot, so stale positions resolve to `None` instead of faulting.
/// Boundaries saturate: `next` at the last item and `prev` at the first
/// item do nothing.
#[derive(Debug, Clone, Default)]
pub struct NavigationCursor {
    position: CursorPosition,
    visible: bool,
}

impl NavigationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the detail view is showing
    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Last position, retained after `close`
    pub fn position(&self) -> CursorPosition {
        self.position
    }

    /// Open the detail view on the item tapped at (section, row, column).
    ///
    /// Coordinates are clamped into the snapshot, since a tap can race a
    /// data refresh. With no items at all the view stays closed.
    /// Returns whether the view is open afterwards.
    pub fn open(
        &mut self,
        sections: &[Section],
        section: usize,
        row: usize,
        column: usize,
        row_size: usize,
    ) -> bool {
        let index = SectionIndex::new(sections);
        if index.total_item_count() == 0 {
            debug!("ignoring open on an empty gallery");
            self.visible = false;
            return false;
        }

        let clamped_section = section.min(index.section_count() - 1);
        let requested_item = flat_index_of(row, column, row_size);
        let last_item = index.section_item_count(clamped_section).saturating_sub(1);
        let clamped_item = requested_item.min(last_item);

        if clamped_section != section || clamped_item != requested_item {
            debug!(
                section,
                item = requested_item,
                clamped_section,
                clamped_item,
                "clamped stale open coordinates"
            );
        }

        self.position = CursorPosition::new(clamped_section, clamped_item);
        self.visible = true;
        true
    }

    /// Hide the detail view, keeping the position
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Step forward, crossing into the next section at the end of one.
    /// Returns whether the position changed.
    pub fn next(&mut self, sections: &[Section]) -> bool {
        let index = SectionIndex::new(sections);
        if !self.visible || self.position.section >= index.section_count() {
            return false;
        }

        let flat_len = index.section_item_count(self.position.section);
        if self.position.item.saturating_add(1) < flat_len {
            self.position.item += 1;
        } else if self.position.section + 1 < index.section_count() {
            self.position = CursorPosition::new(self.position.section + 1, 0);
        } else {
            return false;
        }
        true
    }

    /// Step back, crossing to the last item of the previous section.
    /// Returns whether the position changed.
    pub fn prev(&mut self, sections: &[Section]) -> bool {
        let index = SectionIndex::new(sections);
        if !self.visible || self.position.section >= index.section_count() {
            return false;
        }

        let last_item = index
            .section_item_count(self.position.section)
            .saturating_sub(1);
        let item = self.position.item.min(last_item);

        if item > 0 {
            self.position.item = item - 1;
        } else if self.position.section > 0 {
            let section = self.position.section - 1;
            let item = index.section_item_count(section).saturating_sub(1);
            self.position = CursorPosition::new(section, item);
        } else {
            return false;
        }
        true
    }

    /// Item under the cursor in the live snapshot, whether or not the view
    /// is showing. `None` means the position is stale or the gallery empty.
    pub fn current<'a>(&self, sections: &'a [Section]) -> Option<&'a MediaItem> {
        SectionIndex::new(sections).item_at_flat(self.position.section, self.position.item)
    }

    /// Move to a position found after the sections were regenerated
    pub(crate) fn relocate(&mut self, position: CursorPosition) {
        self.position = position;
    }
}
