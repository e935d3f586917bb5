//! Storage and broadcast adapters for the pipeline's seams.

use asraya_content::{ContentStore, DayDefinition};
use asraya_events::{Broadcaster, FlameEvent};
use async_trait::async_trait;

use crate::error::SeedError;
use crate::pipeline::{ContentSource, StatusNotifier};

/// Day content served from the object-storage bucket.
pub struct StorageContentSource {
    store: ContentStore,
}

impl StorageContentSource {
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContentSource for StorageContentSource {
    async fn load_day(&self, day: u32) -> Result<DayDefinition, SeedError> {
        Ok(self.store.fetch_day(day).await?)
    }
}

/// Status notifications over the realtime broadcast channel.
///
/// Delegates to the best-effort publish, which logs and swallows its
/// own failures, keeping this seam infallible.
pub struct BroadcastNotifier {
    broadcaster: Broadcaster,
}

impl BroadcastNotifier {
    pub fn new(broadcaster: Broadcaster) -> Self {
        Self { broadcaster }
    }
}

#[async_trait]
impl StatusNotifier for BroadcastNotifier {
    async fn notify(&self, event: FlameEvent) {
        self.broadcaster.publish_best_effort(&event).await;
    }
}
