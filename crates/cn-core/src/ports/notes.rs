use async_trait::async_trait;

use crate::notes::NoteTitle;
use crate::ports::errors::NotesError;

/// Notes storage port, implemented by the local notes directory and by the
/// remote HTTP mirror.
///
/// 笔记存储端口：本地目录与远端 HTTP 镜像都实现此接口。
///
/// # Behavior
/// - `read` / `delete` return [`NotesError::NotFound`] for unknown titles.
/// - `write` creates or overwrites; last writer wins.
/// - Remote implementations report connection failures as
///   [`NotesError::RemoteUnavailable`].
#[async_trait]
pub trait NotesRepositoryPort: Send + Sync {
    async fn list(&self) -> Result<Vec<NoteTitle>, NotesError>;

    async fn read(&self, title: &NoteTitle) -> Result<String, NotesError>;

    async fn write(&self, title: &NoteTitle, content: &str) -> Result<(), NotesError>;

    async fn delete(&self, title: &NoteTitle) -> Result<(), NotesError>;
}

/// A notes repository that can be probed for reachability.
#[async_trait]
pub trait RemoteNotesPort: NotesRepositoryPort {
    /// Single timeout-bounded reachability check.
    async fn probe(&self) -> Result<(), NotesError>;
}
