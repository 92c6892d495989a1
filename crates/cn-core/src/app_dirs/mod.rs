use std::path::{Path, PathBuf};

/// Root directory every persisted file of the application lives under.
///
/// 应用数据根目录（纯事实容器）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    pub fn new(app_data_root: impl Into<PathBuf>) -> Self {
        Self {
            app_data_root: app_data_root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.app_data_root
    }
}
