use tracing::{debug, info, warn};

use super::config::GalleryConfig;
use super::data::MediaItem;
use crate::error::{Error, Result};
use crate::feed::FeedEvent;
use crate::timeline::{self, CursorPosition, NavigationCursor, Section, SectionIndex};

/// Availability of the external media feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// No snapshot received yet
    Loading,
    /// At least one snapshot received and the feed is healthy
    Ready,
    /// The feed reported a failure; the last good snapshot is kept
    Unavailable(String),
}

/// The MediaLibrary owns the gallery state.
///
/// It holds the latest raw snapshot, the tag query and the configuration,
/// and keeps the derived sections and the detail view cursor consistent
/// with them. Sections are rebuilt wholesale whenever an input changes.
pub struct MediaLibrary {
    config: GalleryConfig,
    raw_items: Vec<MediaItem>,
    query: String,
    sections: Vec<Section>,
    cursor: NavigationCursor,
    status: FeedStatus,
}

impl MediaLibrary {
    /// Create an empty library, waiting for its first snapshot
    pub fn new(config: GalleryConfig) -> Result<Self> {
        config.validate()?;

        Ok(MediaLibrary {
            config,
            raw_items: Vec::new(),
            query: String::new(),
            sections: Vec::new(),
            cursor: NavigationCursor::new(),
            status: FeedStatus::Loading,
        })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    /// Apply one event from the feed subscription
    pub fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Snapshot(items) => self.replace_items(items),
            FeedEvent::Failed(reason) => self.mark_unavailable(reason),
        }
    }

    /// Replace the whole raw snapshot
    pub fn replace_items(&mut self, items: Vec<MediaItem>) {
        self.raw_items = items;
        self.status = FeedStatus::Ready;
        self.regenerate();
        info!(
            items = self.raw_items.len(),
            sections = self.sections.len(),
            "applied media snapshot"
        );
    }

    /// Record a feed failure without discarding the current snapshot
    pub fn mark_unavailable(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%reason, "media feed unavailable");
        self.status = FeedStatus::Unavailable(reason);
    }

    pub fn raw_items(&self) -> &[MediaItem] {
        &self.raw_items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Change the tag query; an empty string clears filtering
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        debug!(%query, "tag query changed");
        self.query = query;
        self.regenerate();
    }

    pub fn row_size(&self) -> usize {
        self.config.row_size
    }

    /// Change the grid row size and rebuild the rows
    pub fn set_row_size(&mut self, row_size: usize) -> Result<()> {
        if row_size == 0 {
            return Err(Error::InvalidRowSize(row_size));
        }
        if row_size != self.config.row_size {
            self.config.row_size = row_size;
            self.regenerate();
        }
        Ok(())
    }

    /// Sections in display order, most recent date first
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn index(&self) -> SectionIndex<'_> {
        SectionIndex::new(&self.sections)
    }

    /// Number of items after filtering
    pub fn item_count(&self) -> usize {
        self.index().total_item_count()
    }

    /// True when there is nothing to show for the current query
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    /// Whether the full-screen detail view is showing
    pub fn is_viewing(&self) -> bool {
        self.cursor.is_open()
    }

    /// Open the detail view on the item tapped at (section, row, column)
    pub fn open(&mut self, section: usize, row: usize, column: usize) -> Option<&MediaItem> {
        self.cursor
            .open(&self.sections, section, row, column, self.config.row_size);
        self.current()
    }

    /// Hide the detail view; the cursor position is kept
    pub fn close(&mut self) {
        self.cursor.close();
    }

    /// Show the next item, crossing into the next section if needed
    pub fn next(&mut self) -> Option<&MediaItem> {
        self.cursor.next(&self.sections);
        self.current()
    }

    /// Show the previous item, crossing into the previous section if needed
    pub fn prev(&mut self) -> Option<&MediaItem> {
        self.cursor.prev(&self.sections);
        self.current()
    }

    /// Item shown in the detail view, `None` when the view is closed.
    ///
    /// Consumers treat `None` while viewing as a signal to close the view.
    pub fn current(&self) -> Option<&MediaItem> {
        if !self.cursor.is_open() {
            return None;
        }
        self.cursor.current(&self.sections)
    }

    /// Rebuild the sections from the current inputs.
    ///
    /// An open detail view follows its item (journal id and media id) into
    /// the new sections and is closed when the item is gone.
    fn regenerate(&mut self) {
        let viewed = self.cursor.is_open().then(|| self.viewed_item());

        self.sections = timeline::build_sections(
            &self.raw_items,
            &self.query,
            self.config.row_size,
            &self.config.date_format,
        );
        debug!(
            sections = self.sections.len(),
            items = self.item_count(),
            "rebuilt media sections"
        );

        if let Some(viewed) = viewed {
            self.follow_viewed_item(viewed);
        }
    }

    /// Identity and global offset of the item under the cursor
    fn viewed_item(&self) -> Option<ViewedItem> {
        let item = self.cursor.current(&self.sections)?;
        let position = self.cursor.position();

        Some(ViewedItem {
            journal_id: item.journal_id.clone(),
            id: item.id.clone(),
            offset: self.index().global_offset(position.section, position.item),
        })
    }

    fn follow_viewed_item(&mut self, viewed: Option<ViewedItem>) {
        let found = viewed.as_ref().and_then(|v| {
            SectionIndex::new(&self.sections).locate(&v.journal_id, &v.id, v.offset)
        });

        match found {
            Some((section, item)) => {
                let position = CursorPosition::new(section, item);
                if position != self.cursor.position() {
                    debug!(section, item, "moved cursor to follow viewed item");
                }
                self.cursor.relocate(position);
            }
            None => {
                let id = viewed.as_ref().map_or("<none>", |v| v.id.as_str());
                info!(id, "viewed item is gone, closing detail view");
                self.cursor.close();
            }
        }
    }
}

/// The item an open detail view is showing, captured before a rebuild
struct ViewedItem {
    journal_id: String,
    id: String,
    offset: usize,
}

// Implement Debug without dumping the whole snapshot
impl std::fmt::Debug for MediaLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaLibrary")
            .field("items", &self.raw_items.len())
            .field("sections", &self.sections.len())
            .field("query", &self.query)
            .field("status", &self.status)
            .field("cursor", &self.cursor)
            .finish()
    }
}
