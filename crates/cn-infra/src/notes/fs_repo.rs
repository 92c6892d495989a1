use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use cn_core::notes::{NoteTitle, NOTE_EXTENSION};
use cn_core::ports::{NotesError, NotesRepositoryPort};

/// Notes stored as `<dir>/<title>.txt`, one UTF-8 file per note.
///
/// The directory is created on first use.
pub struct FsNotesRepository {
    dir: PathBuf,
}

impl FsNotesRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn note_path(&self, title: &NoteTitle) -> PathBuf {
        self.dir.join(title.file_name())
    }

    async fn ensure_dir(&self) -> Result<(), NotesError> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            NotesError::Storage(format!(
                "create notes dir {} failed: {e}",
                self.dir.display()
            ))
        })
    }

    fn map_io(&self, title: &NoteTitle, action: &str, err: std::io::Error) -> NotesError {
        if err.kind() == std::io::ErrorKind::NotFound {
            NotesError::NotFound(title.to_string())
        } else {
            NotesError::Storage(format!("{action} note '{title}' failed: {err}"))
        }
    }
}

#[async_trait]
impl NotesRepositoryPort for FsNotesRepository {
    /// Titles of every `*.txt` file in the directory, sorted ascending.
    async fn list(&self) -> Result<Vec<NoteTitle>, NotesError> {
        self.ensure_dir().await?;

        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| NotesError::Storage(format!("list notes failed: {e}")))?;

        let mut titles = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| NotesError::Storage(format!("list notes failed: {e}")))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(NOTE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match NoteTitle::parse(stem) {
                Ok(title) => titles.push(title),
                Err(e) => warn!(file = %path.display(), error = %e, "skipping note file"),
            }
        }

        titles.sort();
        Ok(titles)
    }

    async fn read(&self, title: &NoteTitle) -> Result<String, NotesError> {
        fs::read_to_string(self.note_path(title))
            .await
            .map_err(|e| self.map_io(title, "read", e))
    }

    async fn write(&self, title: &NoteTitle, content: &str) -> Result<(), NotesError> {
        self.ensure_dir().await?;
        fs::write(self.note_path(title), content)
            .await
            .map_err(|e| self.map_io(title, "write", e))?;
        debug!(title = %title, bytes = content.len(), "note written");
        Ok(())
    }

    async fn delete(&self, title: &NoteTitle) -> Result<(), NotesError> {
        fs::remove_file(self.note_path(title))
            .await
            .map_err(|e| self.map_io(title, "delete", e))?;
        debug!(title = %title, "note deleted");
        Ok(())
    }
}
