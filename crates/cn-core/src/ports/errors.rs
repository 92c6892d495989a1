use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// A persisted list file (history or pinned items) exists but is not a
    /// JSON array of strings.
    #[error("list file is malformed ({path}): {reason}")]
    Malformed { path: String, reason: String },

    #[error("entry not found in history: {0}")]
    EntryNotFound(String),

    #[error("history entries must not be empty")]
    EmptyEntry,

    #[error("entry already present in history: {0}")]
    DuplicateEntry(String),

    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum NotesError {
    #[error("note not found: {0}")]
    NotFound(String),

    #[error("invalid note: {0}")]
    Validation(String),

    /// Network failure or timeout talking to the remote mirror.
    #[error("remote notes service unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl NotesError {
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self, NotesError::RemoteUnavailable(_))
    }
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The platform clipboard could not be opened or read.
    #[error("system clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard holds no text.
    #[error("system clipboard holds no text")]
    Empty,
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("platform data directory unavailable")]
    DataDirUnavailable,
}
