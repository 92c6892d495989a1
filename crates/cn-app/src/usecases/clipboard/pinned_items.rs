use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use cn_core::clipboard::PinnedItems;
use cn_core::ports::{HistoryError, HistoryStorePort};

/// Pinned clipboard items, persisted the same way as the history.
pub struct PinnedItemsService {
    items: Mutex<PinnedItems>,
    store: Arc<dyn HistoryStorePort>,
}

impl PinnedItemsService {
    #[tracing::instrument(name = "usecase.pinned_items.load", skip(store))]
    pub async fn load(store: Arc<dyn HistoryStorePort>) -> Result<Self, HistoryError> {
        let items = PinnedItems::from_items(store.load().await?);
        debug!(items = items.items().len(), "pinned items loaded");
        Ok(Self {
            items: Mutex::new(items),
            store,
        })
    }

    /// Returns `false` when `text` is empty or already pinned.
    #[tracing::instrument(name = "usecase.pinned_items.pin", skip_all)]
    pub async fn pin(&self, text: String) -> Result<bool, HistoryError> {
        let mut guard = self.items.lock().await;
        let mut next = guard.clone();

        if !next.pin(text) {
            return Ok(false);
        }

        self.store.save(next.items()).await?;
        *guard = next;
        info!("item pinned");
        Ok(true)
    }

    /// Returns `false` without writing when `text` was not pinned.
    #[tracing::instrument(name = "usecase.pinned_items.unpin", skip_all)]
    pub async fn unpin(&self, text: &str) -> Result<bool, HistoryError> {
        let mut guard = self.items.lock().await;
        let mut next = guard.clone();

        if !next.unpin(text) {
            return Ok(false);
        }

        self.store.save(next.items()).await?;
        *guard = next;
        info!("item unpinned");
        Ok(true)
    }

    pub async fn all(&self) -> Vec<String> {
        self.items.lock().await.snapshot()
    }
}
