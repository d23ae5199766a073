use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::FeedEvent;
use crate::state::library::MediaLibrary;

/// Live link between a feed channel and a MediaLibrary.
///
/// Dropping the subscription aborts the forwarding task, so no snapshot is
/// applied after the owning view is gone.
pub struct Subscription {
    owner: String,
    handle: Option<JoinHandle<()>>,
}

/// Start forwarding `events` into `library` on the tokio runtime.
///
/// Each event is applied under a single lock acquisition, so readers see
/// either the previous snapshot or the new one, never a mix.
pub fn subscribe(
    owner: impl Into<String>,
    mut events: mpsc::Receiver<FeedEvent>,
    library: Arc<Mutex<MediaLibrary>>,
) -> Subscription {
    let owner = owner.into();
    info!(%owner, "subscribed to media feed");

    let task_owner = owner.clone();
    let handle = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            apply_event(&library, event);
        }
        debug!(owner = %task_owner, "media feed closed");
    });

    Subscription {
        owner,
        handle: Some(handle),
    }
}

fn apply_event(library: &Mutex<MediaLibrary>, event: FeedEvent) {
    // A panic elsewhere must not stop later snapshots from landing
    let mut library = library.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    library.apply(event);
}

impl Subscription {
    /// Identity the feed is keyed by
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// True while the forwarding task is still running
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Wait for the feed to close its channel and all events to be applied
    pub async fn finished(mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(owner = %self.owner, "media feed task failed: {}", e);
            }
        }
    }

    /// Stop receiving snapshots now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!(owner = %self.owner, "unsubscribed from media feed");
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("owner", &self.owner)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::config::GalleryConfig;
    use crate::state::data::{MediaItem, MediaType};
    use crate::state::library::FeedStatus;

    fn item(id: &str, date: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            url: format!("https://cdn/{id}.jpg"),
            kind: MediaType::Video,
            upload_date: date.to_string(),
            tags: Vec::new(),
            journal_id: "j1".to_string(),
        }
    }

    fn shared_library() -> Arc<Mutex<MediaLibrary>> {
        Arc::new(Mutex::new(MediaLibrary::new(GalleryConfig::default()).unwrap()))
    }

    #[tokio::test]
    async fn test_snapshots_replace_library_contents() {
        let library = shared_library();
        let (tx, rx) = mpsc::channel(8);
        let subscription = subscribe("user-1", rx, library.clone());
        assert_eq!(subscription.owner(), "user-1");

        tx.send(FeedEvent::Snapshot(vec![item("a", "10 June 2024"), item("b", "09 June 2024")]))
            .await
            .unwrap();
        tx.send(FeedEvent::Snapshot(vec![item("c", "10 June 2024")]))
            .await
            .unwrap();
        drop(tx);
        subscription.finished().await;

        let library = library.lock().unwrap();
        assert_eq!(library.status(), &FeedStatus::Ready);
        assert_eq!(library.item_count(), 1);
        assert_eq!(library.raw_items()[0].id, "c");
    }

    #[tokio::test]
    async fn test_failure_is_reported_as_unavailable() {
        let library = shared_library();
        let (tx, rx) = mpsc::channel(8);
        let subscription = subscribe("user-1", rx, library.clone());

        tx.send(FeedEvent::Failed("offline".to_string())).await.unwrap();
        drop(tx);
        subscription.finished().await;

        assert_eq!(
            library.lock().unwrap().status(),
            &FeedStatus::Unavailable("offline".to_string())
        );
    }

    #[tokio::test]
    async fn test_dropping_subscription_stops_updates() {
        let library = shared_library();
        let (tx, rx) = mpsc::channel(8);
        let subscription = subscribe("user-1", rx, library.clone());

        subscription.unsubscribe();
        // Resolves once the aborted task has dropped its receiver
        tx.closed().await;

        assert!(tx.send(FeedEvent::Snapshot(vec![item("a", "10 June 2024")])).await.is_err());
        let library = library.lock().unwrap();
        assert_eq!(library.status(), &FeedStatus::Loading);
        assert!(library.is_empty());
    }
}
