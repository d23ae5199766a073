use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::state::data::MediaItem;

/// Items sharing one upload date key, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup {
    pub date_key: String,
    /// `None` when the key does not parse with the configured format
    pub date: Option<NaiveDate>,
    pub items: Vec<MediaItem>,
}

/// Parse a section date key such as "10 June 2024"
pub fn parse_date_key(key: &str, date_format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), date_format).ok()
}

/// Partition `items` by upload date, most recent date first.
///
/// Keys that fail to parse are pinned after every dated group and keep
/// their first-seen order. The sort is stable, so keys that parse to the
/// same day also keep first-seen order.
pub fn group_by_date(items: &[MediaItem], date_format: &str) -> Vec<DateGroup> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<DateGroup> = Vec::new();

    for item in items {
        let key = item.upload_date.as_str();
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push(DateGroup {
                date_key: key.to_string(),
                date: parse_date_key(key, date_format),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(item.clone());
    }

    groups.sort_by(|a, b| newest_first(a.date, b.date));
    groups
}

fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
