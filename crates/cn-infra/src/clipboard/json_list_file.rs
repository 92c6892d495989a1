use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use cn_core::ports::{HistoryError, HistoryStorePort};

/// A JSON array of strings kept in a single file.
///
/// Every `save` rewrites the whole file in place. There is no
/// write-then-rename step, so a crash in the middle of a write can leave a
/// truncated file behind; the next `load` then reports
/// [`HistoryError::Malformed`].
pub struct JsonListFile {
    path: PathBuf,
}

impl JsonListFile {
    /// Creates a store backed by the file at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cn_infra::clipboard::JsonListFile;
    /// let _store = JsonListFile::new("/tmp/clipnote/clipboard_history.json");
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_err(&self, action: &str, err: impl std::fmt::Display) -> HistoryError {
        HistoryError::Storage(format!("{action} {} failed: {err}", self.path.display()))
    }

    /// Ensure the parent directory of the store exists.
    ///
    /// A path without a parent (a bare file name) is a no-op.
    async fn ensure_parent_dir(&self) -> Result<(), HistoryError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| self.storage_err("create dir for", e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStorePort for JsonListFile {
    /// Loads the list; a missing file yields an empty list.
    async fn load(&self) -> Result<Vec<String>, HistoryError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "list file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.storage_err("read", e)),
        };

        serde_json::from_str::<Vec<String>>(&content).map_err(|e| HistoryError::Malformed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    async fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
        self.ensure_parent_dir().await?;

        let content =
            serde_json::to_string(entries).map_err(|e| self.storage_err("serialize", e))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| self.storage_err("write", e))?;

        debug!(path = %self.path.display(), count = entries.len(), "list file rewritten");
        Ok(())
    }
}
