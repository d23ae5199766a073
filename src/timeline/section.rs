use chrono::{Local, NaiveDate};

use crate::state::data::MediaItem;

/// One line of the gallery grid
pub type Row = Vec<MediaItem>;

/// A date-keyed group of media, chunked into grid rows
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// The upload date key shared by every item (e.g., "10 June 2024")
    pub date_key: String,
    /// Parsed date, `None` for keys such as "Unknown Date"
    pub date: Option<NaiveDate>,
    /// Items in display order; only the last row may be short
    pub rows: Vec<Row>,
}

impl Section {
    /// Total items across all rows
    pub fn item_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Items in flattened (row-concatenated) order
    pub fn items(&self) -> impl Iterator<Item = &MediaItem> {
        self.rows.iter().flatten()
    }

    /// Item at a flattened index
    pub fn item(&self, index: usize) -> Option<&MediaItem> {
        self.items().nth(index)
    }

    /// Flattened index of the item with `id`
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items().position(|item| item.id == id)
    }

    /// Header text relative to `today`
    pub fn label(&self, today: NaiveDate) -> String {
        match self.date {
            Some(date) if date == today => "Today".to_string(),
            Some(date) if Some(date) == today.pred_opt() => "Yesterday".to_string(),
            _ => self.date_key.clone(),
        }
    }

    /// Header text relative to the local calendar day
    pub fn header(&self) -> String {
        self.label(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::MediaType;

    fn item(id: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            url: format!("https://cdn/{id}.jpg"),
            kind: MediaType::Image,
            upload_date: "10 June 2024".to_string(),
            tags: Vec::new(),
            journal_id: "j1".to_string(),
        }
    }

    fn section(date: Option<NaiveDate>, key: &str) -> Section {
        Section {
            date_key: key.to_string(),
            date,
            rows: vec![vec![item("a"), item("b"), item("c")], vec![item("d")]],
        }
    }

    #[test]
    fn test_flattened_access() {
        let section = section(None, "Unknown Date");

        assert_eq!(section.item_count(), 4);
        assert_eq!(section.item(3).map(|i| i.id.as_str()), Some("d"));
        assert_eq!(section.item(4), None);
        assert_eq!(section.position_of("c"), Some(2));
        assert_eq!(section.position_of("zz"), None);
    }

    #[test]
    fn test_labels() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let older = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();

        assert_eq!(section(Some(today), "10 June 2024").label(today), "Today");
        assert_eq!(section(Some(yesterday), "09 June 2024").label(today), "Yesterday");
        assert_eq!(section(Some(older), "08 June 2024").label(today), "08 June 2024");
        assert_eq!(section(None, "Unknown Date").label(today), "Unknown Date");
    }

    #[test]
    fn test_yesterday_across_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let new_years_eve = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        assert_eq!(section(Some(new_years_eve), "31 December 2024").label(today), "Yesterday");
    }
}
