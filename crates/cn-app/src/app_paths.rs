use std::path::PathBuf;

use cn_core::app_dirs::AppDirs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub history_path: PathBuf,
    pub pinned_path: PathBuf,
    pub notes_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub config_path: PathBuf,
    /// Present while a `watch` process owns the history file.
    pub watch_lock_path: PathBuf,
}

impl AppPaths {
    pub fn from_app_dirs(dirs: &AppDirs) -> Self {
        Self {
            history_path: dirs.app_data_root.join("clipboard_history.json"),
            pinned_path: dirs.app_data_root.join("pinned_items.json"),
            notes_dir: dirs.app_data_root.join("notes"),
            logs_dir: dirs.app_data_root.join("logs"),
            config_path: dirs.app_data_root.join("config.toml"),
            watch_lock_path: dirs.app_data_root.join("watch.lock"),
        }
    }
}
