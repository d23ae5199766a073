/// Journal snapshot loading
///
/// Reads a JSON array of journal entries (the shape the journal store
/// exports) and flattens it into gallery media items.

use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::FeedEvent;
use crate::error::Result;
use crate::state::data::{flatten_entries, JournalEntry, MediaItem};

/// Load journal entries from a JSON file
pub async fn load_entries(path: &Path) -> Result<Vec<JournalEntry>> {
    let bytes = tokio::fs::read(path).await?;
    let entries: Vec<JournalEntry> = serde_json::from_slice(&bytes)?;
    debug!(path = %path.display(), entries = entries.len(), "loaded journal entries");
    Ok(entries)
}

/// Load a journal file and flatten it into a media snapshot
pub async fn load_snapshot(path: &Path) -> Result<Vec<MediaItem>> {
    let entries = load_entries(path).await?;
    Ok(flatten_entries(&entries))
}

/// Publish the snapshot stored at `path` as one feed event.
///
/// Load errors become `FeedEvent::Failed` so the gallery can show an
/// unavailable state instead of an empty one. Returns false if the
/// subscriber is gone.
pub async fn publish_file(path: PathBuf, sender: mpsc::Sender<FeedEvent>) -> bool {
    let event = match load_snapshot(&path).await {
        Ok(items) => FeedEvent::Snapshot(items),
        Err(e) => {
            warn!(path = %path.display(), "failed to load media snapshot: {}", e);
            FeedEvent::Failed(format!("{}: {}", path.display(), e))
        }
    };

    sender.send(event).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::state::data::MediaType;
    use std::io::Write;

    const JOURNALS: &str = r#"[
        {
            "id": "j1",
            "date": "10 June 2024",
            "tags": ["Sunset View"],
            "media": [
                {"url": "https://cdn/a.jpg", "type": "image"},
                {"url": "https://cdn/b.mp4", "type": "video"}
            ]
        },
        {"id": "j2", "date": "09 June 2024", "title": "no media here"},
        {
            "id": "j3",
            "media": [{"id": "m9", "url": "https://cdn/c.jpg", "type": "image"}]
        }
    ]"#;

    fn journal_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_snapshot_flattens_entries() {
        let file = journal_file(JOURNALS);

        let items = load_snapshot(file.path()).await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, "j1:0");
        assert_eq!(items[1].kind, MediaType::Video);
        assert_eq!(items[1].tags, vec!["Sunset View"]);
        assert_eq!(items[2].id, "m9");
        assert_eq!(items[2].upload_date, "Unknown Date");
    }

    #[tokio::test]
    async fn test_load_invalid_json() {
        let file = journal_file("{ not json");

        let err = load_snapshot(file.path()).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_publish_missing_file_sends_failure() {
        let (tx, mut rx) = mpsc::channel(1);

        assert!(publish_file(PathBuf::from("/nonexistent/journals.json"), tx).await);

        match rx.recv().await {
            Some(FeedEvent::Failed(reason)) => assert!(reason.contains("journals.json")),
            other => panic!("expected failure event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_sends_snapshot() {
        let file = journal_file(JOURNALS);
        let (tx, mut rx) = mpsc::channel(1);

        assert!(publish_file(file.path().to_path_buf(), tx).await);

        match rx.recv().await {
            Some(FeedEvent::Snapshot(items)) => assert_eq!(items.len(), 3),
            other => panic!("expected snapshot event, got {:?}", other),
        }
    }
}
