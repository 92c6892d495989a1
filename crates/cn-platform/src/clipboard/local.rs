use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use tokio::task::spawn_blocking;

use cn_core::ports::{ClipboardError, SystemClipboardPort};

/// System clipboard backed by `clipboard-rs`.
///
/// A fresh `ClipboardContext` is opened for every call on the blocking pool;
/// the context is not `Send` on every platform and the OS calls block.
#[derive(Debug, Default)]
pub struct LocalClipboard;

impl LocalClipboard {
    pub fn new() -> Self {
        Self
    }

    async fn with_context<T, F>(f: F) -> Result<T, ClipboardError>
    where
        T: Send + 'static,
        F: FnOnce(&ClipboardContext) -> Result<T, ClipboardError> + Send + 'static,
    {
        spawn_blocking(move || {
            let ctx = ClipboardContext::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            f(&ctx)
        })
        .await
        .map_err(|e| ClipboardError::Unavailable(format!("clipboard task failed: {e}")))?
    }
}

#[async_trait]
impl SystemClipboardPort for LocalClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        Self::with_context(|ctx| {
            if !ctx.has(ContentFormat::Text) {
                return Err(ClipboardError::Empty);
            }
            ctx.get_text()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))
        })
        .await
    }

    async fn write_text(&self, text: String) -> Result<(), ClipboardError> {
        Self::with_context(move |ctx| {
            ctx.set_text(text)
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))
        })
        .await
    }
}
