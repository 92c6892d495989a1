//! Marker file held by the process that watches the clipboard.
//!
//! 剪贴板监听进程持有的标记文件。
//!
//! Only one process may own the history file at a time: a running `watch`
//! keeps the history in memory and rewrites the whole file on every capture,
//! so edits made by another process would be overwritten. The lock file
//! carries the owner's pid and is removed when the [`WatchLock`] is dropped.
//! A crashed watcher leaves the file behind; the error names it so it can be
//! deleted by hand.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum WatchLockError {
    #[error(
        "a clipboard watcher is already running (pid {pid}); \
         delete {} if it is not",
        path.display()
    )]
    Held { pid: String, path: PathBuf },

    #[error("failed to create watch lock {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Exclusive ownership of the history file for the lifetime of the value.
#[derive(Debug)]
pub struct WatchLock {
    path: PathBuf,
}

impl WatchLock {
    /// Create the lock file, failing with [`WatchLockError::Held`] when it
    /// already exists.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, WatchLockError> {
        let path = path.into();
        let io_err = |source| WatchLockError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(WatchLockError::Held {
                    pid: Self::holder(&path).unwrap_or_else(|| "unknown".into()),
                    path,
                });
            }
            Err(e) => return Err(io_err(e)),
        };
        write!(file, "{}", std::process::id()).map_err(io_err)?;

        debug!(path = %path.display(), "watch lock acquired");
        Ok(Self { path })
    }

    /// Pid recorded in an existing lock file, if there is one.
    pub fn holder(path: &Path) -> Option<String> {
        let pid = fs::read_to_string(path).ok()?;
        let pid = pid.trim();
        Some(if pid.is_empty() { "unknown" } else { pid }.to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WatchLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(error = %e, path = %self.path.display(), "failed to remove watch lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn second_acquire_reports_the_holder() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watch.lock");

        let _lock = WatchLock::acquire(&path).unwrap();
        let err = WatchLock::acquire(&path).unwrap_err();

        match err {
            WatchLockError::Held { pid, .. } => assert_eq!(pid, std::process::id().to_string()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn drop_releases_the_lock() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("watch.lock");

        let lock = WatchLock::acquire(&path).unwrap();
        assert!(WatchLock::holder(&path).is_some());
        drop(lock);

        assert!(!path.exists());
        assert!(WatchLock::holder(&path).is_none());
        assert!(WatchLock::acquire(&path).is_ok());
    }
}
