use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use cn_core::clipboard::AddOutcome;
use cn_core::ports::{ClipboardChangeHandler, HistoryError};

use super::ClipboardHistoryService;

/// Record clipboard text reported by the poller into the history.
///
/// 将轮询器上报的剪贴板文本记入历史。
///
/// Empty and already-recorded text is ignored by the history itself; this
/// use case only reports what happened.
pub struct CaptureClipboardUseCase {
    history: Arc<ClipboardHistoryService>,
}

impl CaptureClipboardUseCase {
    pub fn new(history: Arc<ClipboardHistoryService>) -> Self {
        Self { history }
    }

    pub async fn execute(&self, text: String) -> Result<AddOutcome, HistoryError> {
        let outcome = self.history.add(text).await?;
        match &outcome {
            AddOutcome::Added { evicted: Some(_) } => {
                info!("captured clipboard text, oldest entry evicted")
            }
            AddOutcome::Added { evicted: None } => info!("captured clipboard text"),
            AddOutcome::Duplicate => debug!("clipboard text already in history"),
            AddOutcome::Empty => debug!("empty clipboard text ignored"),
        }
        Ok(outcome)
    }
}

#[async_trait]
impl ClipboardChangeHandler for CaptureClipboardUseCase {
    async fn on_clipboard_changed(&self, text: String) -> Result<(), HistoryError> {
        self.execute(text).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cn_core::ports::HistoryStorePort;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore(Mutex<Vec<String>>);

    #[async_trait]
    impl HistoryStorePort for MemoryStore {
        async fn load(&self) -> Result<Vec<String>, HistoryError> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
            *self.0.lock().unwrap() = entries.to_vec();
            Ok(())
        }
    }

    #[tokio::test]
    async fn handler_records_new_text_once() {
        let store = Arc::new(MemoryStore::default());
        let history = Arc::new(ClipboardHistoryService::load(store.clone()).await.unwrap());
        let handler: Arc<dyn ClipboardChangeHandler> =
            Arc::new(CaptureClipboardUseCase::new(history.clone()));

        handler.on_clipboard_changed("hello".into()).await.unwrap();
        handler.on_clipboard_changed("hello".into()).await.unwrap();
        handler.on_clipboard_changed(String::new()).await.unwrap();

        assert_eq!(history.all().await, vec!["hello".to_string()]);
        assert_eq!(*store.0.lock().unwrap(), vec!["hello".to_string()]);
    }
}
