/// Shared data structures for the gallery
///
/// These structs represent the data model that flows from the
/// external journal feed into the timeline pipeline.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Date key given to media whose journal entry has no date
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Kind of media file attached to a journal entry
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Parse the feed's type string ("image" or "video", any case)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "image" => Some(MediaType::Image),
            "video" => Some(MediaType::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

/// Represents a single uploaded media file in the gallery
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Unique media ID
    pub id: String,
    /// Remote URI of the file
    pub url: String,
    /// Image or video
    #[serde(rename = "type")]
    pub kind: MediaType,
    /// Date key in "DD Month YYYY" form (e.g., "10 June 2024")
    pub upload_date: String,
    /// Tags inherited from the owning journal entry
    #[serde(default)]
    pub tags: Vec<String>,
    /// ID of the owning journal entry (lookup only)
    pub journal_id: String,
}

/// Media attachment as stored on a journal entry
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JournalMedia {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A journal entry as delivered by the feed, reduced to what the gallery reads
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media: Vec<JournalMedia>,
}

impl JournalEntry {
    /// Date key shared by every media item of this entry
    pub fn date_key(&self) -> &str {
        match self.date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => date,
            _ => UNKNOWN_DATE,
        }
    }
}

/// Flatten journal entries into the gallery's media list.
///
/// Each attachment takes the entry's date and tags. Attachments without an id
/// are keyed as `<journal id>:<position>`; unsupported types are skipped.
pub fn flatten_entries(entries: &[JournalEntry]) -> Vec<MediaItem> {
    let mut items = Vec::new();

    for entry in entries {
        let upload_date = entry.date_key();

        for (position, media) in entry.media.iter().enumerate() {
            let Some(kind) = MediaType::parse(&media.kind) else {
                warn!(
                    journal_id = %entry.id,
                    media_type = %media.kind,
                    "skipping media with unsupported type"
                );
                continue;
            };

            let id = media
                .id
                .clone()
                .unwrap_or_else(|| format!("{}:{}", entry.id, position));

            items.push(MediaItem {
                id,
                url: media.url.clone(),
                kind,
                upload_date: upload_date.to_string(),
                tags: entry.tags.clone(),
                journal_id: entry.id.clone(),
            });
        }
    }

    items
}
