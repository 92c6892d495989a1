use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use cn_core::ports::{HistoryError, SystemClipboardPort};

use super::ClipboardHistoryService;

/// Copy a history entry back into the system clipboard.
///
/// The entry stays where it is in the history; the poller will see the
/// clipboard change on its next tick and ignore it as a duplicate.
pub struct CopyFromHistory {
    history: Arc<ClipboardHistoryService>,
    local_clipboard: Arc<dyn SystemClipboardPort>,
}

impl CopyFromHistory {
    pub fn new(
        history: Arc<ClipboardHistoryService>,
        local_clipboard: Arc<dyn SystemClipboardPort>,
    ) -> Self {
        Self {
            history,
            local_clipboard,
        }
    }

    /// Fails with [`HistoryError::EntryNotFound`] when `text` is not in the history.
    #[tracing::instrument(name = "usecase.copy_from_history.execute", skip_all)]
    pub async fn execute(&self, text: &str) -> Result<()> {
        if !self.history.contains(text).await {
            return Err(HistoryError::EntryNotFound(text.to_string()).into());
        }

        self.local_clipboard.write_text(text.to_string()).await?;
        info!(len = text.len(), "history entry copied to clipboard");
        Ok(())
    }
}
