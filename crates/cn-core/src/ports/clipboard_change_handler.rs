//! Clipboard change handler port
//!
//! This port defines the callback interface for handling clipboard change events
//! from the platform layer. It follows the Dependency Inversion Principle:
//! - Platform layer (low-level) depends on this abstraction
//! - App layer (high-level) implements this interface

use crate::ports::errors::HistoryError;

/// Callback handler for clipboard change events.
///
/// The platform layer calls this when the clipboard text differs from the
/// last value it observed. The text is already read by the platform layer.
#[async_trait::async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    /// Called when clipboard text changes.
    ///
    /// # Parameters
    /// - `text`: The current clipboard text captured by the platform layer
    async fn on_clipboard_changed(&self, text: String) -> Result<(), HistoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_change_handler_is_object_safe() {
        fn assert_object_safe(_trait_obj: Option<&dyn ClipboardChangeHandler>) {}
        assert_object_safe(None);
    }
}
