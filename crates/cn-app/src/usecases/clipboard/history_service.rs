use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use cn_core::clipboard::{AddOutcome, ClipboardHistory};
use cn_core::ports::{HistoryError, HistoryStorePort};

/// The single authoritative clipboard history of the process.
///
/// 进程内唯一的剪贴板历史记录。
///
/// Every mutation runs under one lock for the whole
/// read → mutate → persist sequence, so the poller and user commands never
/// interleave. Mutations are applied to a copy and only committed to memory
/// once the store accepted it; a failed write leaves both unchanged.
pub struct ClipboardHistoryService {
    history: Mutex<ClipboardHistory>,
    store: Arc<dyn HistoryStorePort>,
}

impl ClipboardHistoryService {
    /// Load the persisted history.
    ///
    /// Persisted entries are replayed through the `add` rules, so a file
    /// with duplicates or more than the capacity is normalised in memory.
    /// A malformed file fails with [`HistoryError::Malformed`].
    #[tracing::instrument(name = "usecase.clipboard_history.load", skip(store))]
    pub async fn load(store: Arc<dyn HistoryStorePort>) -> Result<Self, HistoryError> {
        let raw = store.load().await?;
        let raw_len = raw.len();
        let history = ClipboardHistory::from_entries(raw);

        if history.len() != raw_len {
            warn!(
                persisted = raw_len,
                kept = history.len(),
                "persisted history normalised on load"
            );
        }
        info!(entries = history.len(), "clipboard history loaded");

        Ok(Self {
            history: Mutex::new(history),
            store,
        })
    }

    /// Record `text` unless it is empty or already present.
    #[tracing::instrument(
        name = "usecase.clipboard_history.add",
        skip(self, text),
        fields(len = text.len())
    )]
    pub async fn add(&self, text: String) -> Result<AddOutcome, HistoryError> {
        let mut guard = self.history.lock().await;
        let mut next = guard.clone();

        let outcome = next.add(text);
        if outcome.is_added() {
            self.store.save(next.entries()).await?;
            *guard = next;
        }

        debug!(?outcome, "history add");
        Ok(outcome)
    }

    /// Remove `text`. Returns `false` without touching the store when absent.
    #[tracing::instrument(name = "usecase.clipboard_history.remove", skip_all)]
    pub async fn remove(&self, text: &str) -> Result<bool, HistoryError> {
        let mut guard = self.history.lock().await;
        let mut next = guard.clone();

        if !next.remove(text) {
            debug!("remove of absent entry ignored");
            return Ok(false);
        }

        self.store.save(next.entries()).await?;
        *guard = next;
        Ok(true)
    }

    #[tracing::instrument(name = "usecase.clipboard_history.replace", skip_all)]
    pub async fn replace(&self, old: &str, new: String) -> Result<(), HistoryError> {
        let mut guard = self.history.lock().await;
        let mut next = guard.clone();

        next.replace(old, new)?;

        self.store.save(next.entries()).await?;
        *guard = next;
        Ok(())
    }

    #[tracing::instrument(name = "usecase.clipboard_history.clear", skip_all)]
    pub async fn clear(&self) -> Result<(), HistoryError> {
        let mut guard = self.history.lock().await;

        self.store.save(&[]).await?;
        guard.clear();
        info!("clipboard history cleared");
        Ok(())
    }

    /// Ordered snapshot, oldest first.
    pub async fn all(&self) -> Vec<String> {
        self.history.lock().await.snapshot()
    }

    pub async fn contains(&self, text: &str) -> bool {
        self.history.lock().await.contains(text)
    }
}
