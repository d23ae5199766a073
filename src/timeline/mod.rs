/// Media timeline pipeline
///
/// raw items → tag filter (filter.rs) → date groups (group.rs)
/// → grid rows (chunk.rs) → sections (section.rs)
///
/// Sections are addressed through `index.rs` and walked by the
/// navigation cursor in `cursor.rs`.

pub mod chunk;
pub mod cursor;
pub mod filter;
pub mod group;
pub mod index;
pub mod section;

pub use cursor::{CursorPosition, NavigationCursor};
pub use index::{flat_index_of, SectionIndex};
pub use section::{Row, Section};

use crate::state::data::MediaItem;

/// Derive the gallery sections from a raw snapshot.
///
/// A pure function of its inputs: the whole result is rebuilt on every
/// snapshot, query or row size change.
pub fn build_sections(
    items: &[MediaItem],
    query: &str,
    row_size: usize,
    date_format: &str,
) -> Vec<Section> {
    let filtered = filter::filter_by_tag(items, query);

    group::group_by_date(&filtered, date_format)
        .into_iter()
        .map(|group| Section {
            rows: chunk::chunk_rows(&group.items, row_size),
            date_key: group.date_key,
            date: group.date,
        })
        .collect()
}
