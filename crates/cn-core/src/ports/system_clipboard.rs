//! System clipboard port - abstracts platform clipboard access
//!
//! Only text is modelled; every other clipboard format is invisible to the
//! application.

use async_trait::async_trait;

use crate::ports::errors::ClipboardError;

/// Platform-agnostic access to the system clipboard text.
///
/// 系统剪贴板文本访问端口。
#[async_trait]
pub trait SystemClipboardPort: Send + Sync {
    /// Read the current clipboard text.
    ///
    /// Returns [`ClipboardError::Empty`] when the clipboard holds no text.
    async fn read_text(&self) -> Result<String, ClipboardError>;

    /// Replace the clipboard content with `text`.
    async fn write_text(&self, text: String) -> Result<(), ClipboardError>;
}
