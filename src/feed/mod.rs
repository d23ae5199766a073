/// External media feed plumbing
///
/// This module handles:
/// - Forwarding feed snapshots into a MediaLibrary (subscription.rs)
/// - Loading journal snapshots from JSON files (file.rs)

pub mod file;
pub mod subscription;

pub use subscription::{subscribe, Subscription};

use crate::state::data::MediaItem;

/// One delivery from the feed: a full replacement snapshot or a failure
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Snapshot(Vec<MediaItem>),
    Failed(String),
}
