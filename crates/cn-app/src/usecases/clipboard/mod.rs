mod capture_clipboard;
mod copy_from_history;
mod history_service;
mod pinned_items;

pub use capture_clipboard::CaptureClipboardUseCase;
pub use copy_from_history::CopyFromHistory;
pub use history_service::ClipboardHistoryService;
pub use pinned_items::PinnedItemsService;
