use crate::state::data::MediaItem;

use super::section::Section;

/// Map grid coordinates to the flattened per-section item index.
///
/// Valid because every row but the last holds exactly `row_size` items.
pub fn flat_index_of(row: usize, column: usize, row_size: usize) -> usize {
    row.saturating_mul(row_size).saturating_add(column)
}

/// Read-only addressing over one sections snapshot
#[derive(Debug, Clone, Copy)]
pub struct SectionIndex<'a> {
    sections: &'a [Section],
}

impl<'a> SectionIndex<'a> {
    pub fn new(sections: &'a [Section]) -> Self {
        Self { sections }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Items in a section, 0 for an unknown section
    pub fn section_item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, Section::item_count)
    }

    pub fn total_item_count(&self) -> usize {
        self.sections.iter().map(Section::item_count).sum()
    }

    /// Item rendered at (section, row, column)
    pub fn item_at(&self, section: usize, row: usize, column: usize) -> Option<&'a MediaItem> {
        self.sections.get(section)?.rows.get(row)?.get(column)
    }

    /// Item at a cursor position (section, flattened item index)
    pub fn item_at_flat(&self, section: usize, item: usize) -> Option<&'a MediaItem> {
        self.sections.get(section)?.item(item)
    }

    /// Offset of (section, item) in the sequence flattened across sections
    pub fn global_offset(&self, section: usize, item: usize) -> usize {
        let before: usize = self
            .sections
            .iter()
            .take(section)
            .map(Section::item_count)
            .sum();
        before.saturating_add(item)
    }

    /// Cursor position of the item attached to `journal_id` with `id`.
    ///
    /// The same media can appear more than once; the occurrence whose global
    /// offset is closest to `near` wins, the earlier one on a tie.
    pub fn locate(&self, journal_id: &str, id: &str, near: usize) -> Option<(usize, usize)> {
        let mut best: Option<(usize, (usize, usize))> = None;
        let mut offset = 0;

        for (section, s) in self.sections.iter().enumerate() {
            for (item, media) in s.items().enumerate() {
                if media.journal_id != journal_id || media.id != id {
                    continue;
                }
                let distance = (offset + item).abs_diff(near);
                if best.map_or(true, |(closest, _)| distance < closest) {
                    best = Some((distance, (section, item)));
                }
            }
            offset += s.item_count();
        }

        best.map(|(_, position)| position)
    }
}
