//! Business logic use cases
//!
//! ```text
//! [ClipboardPoller] → CaptureClipboardUseCase → ClipboardHistoryService
//!                                                     ↓
//!                                      CopyFromHistory → system clipboard
//!
//! NotesService → remote mirror (while online) | notes directory
//! ```

mod clipboard_watcher;
pub mod clipboard;
pub mod notes;

pub use clipboard::{
    CaptureClipboardUseCase, ClipboardHistoryService, CopyFromHistory, PinnedItemsService,
};
pub use clipboard_watcher::{ClipboardWatcherError, StartClipboardWatcher, StopClipboardWatcher};
pub use notes::{NotesService, RemoteMirror};
