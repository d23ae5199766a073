//! Media timeline index and navigation for a journal gallery.
//!
//! Uploaded media is filtered by tag, grouped into date sections (newest
//! first), chunked into grid rows, and walked one item at a time by a
//! cursor that crosses section boundaries.

pub mod error;
pub mod feed;
pub mod state;
pub mod timeline;

pub use error::{Error, Result};
pub use feed::{FeedEvent, Subscription};
pub use state::config::GalleryConfig;
pub use state::data::{JournalEntry, MediaItem, MediaType};
pub use state::library::{FeedStatus, MediaLibrary};
pub use timeline::{CursorPosition, NavigationCursor, Section, SectionIndex};
