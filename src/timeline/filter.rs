use crate::state::data::MediaItem;

/// Keep items with at least one tag containing `query`, case-insensitively.
///
/// An empty query returns every item in its original order; untagged items
/// never match a non-empty query.
pub fn filter_by_tag(items: &[MediaItem], query: &str) -> Vec<MediaItem> {
    if query.is_empty() {
        return items.to_vec();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches_tag(item, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be lowercase
fn matches_tag(item: &MediaItem, needle: &str) -> bool {
    item.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}
