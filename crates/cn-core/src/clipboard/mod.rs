//! Clipboard domain models.
mod history;
mod pinned;

pub use history::{AddOutcome, ClipboardHistory, HISTORY_CAPACITY};
pub use pinned::PinnedItems;
