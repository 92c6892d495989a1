//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! external dependencies.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `cn-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases or domains?**
//! 3. **Is it implemented by the infrastructure or platform layer?**
//!
//! If all three answers are **yes**, place it in `cn-core/ports`.
//! Otherwise, place it in the relevant domain module.

pub mod app_dirs;
mod clipboard_change_handler;
pub mod errors;
pub mod history_store;
pub mod notes;
pub mod system_clipboard;
pub mod watcher_control;

pub use app_dirs::AppDirsPort;
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use errors::{AppDirsError, ClipboardError, HistoryError, NotesError};
pub use history_store::HistoryStorePort;
pub use notes::{NotesRepositoryPort, RemoteNotesPort};
pub use system_clipboard::SystemClipboardPort;
pub use watcher_control::{WatcherControlError, WatcherControlPort};
