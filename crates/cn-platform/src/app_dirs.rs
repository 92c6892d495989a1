//! Data root under the platform's local data directory.
//!
//! 平台本地数据目录下的数据根目录：`clipnote` 或 `clipnote-<profile>`。

use std::path::PathBuf;

use cn_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "clipnote";

/// Environment variable selecting an isolated data root (`clipnote-<profile>`).
pub const PROFILE_ENV: &str = "CN_PROFILE";

/// Directory name for a profile; an empty or missing profile means the
/// default root.
pub fn data_root_name(profile: Option<&str>) -> String {
    match profile.map(str::trim) {
        Some(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Resolves [`AppDirs`] from a base directory and an optional profile.
#[derive(Debug, Clone, Default)]
pub struct LocalDataDirs {
    base: Option<PathBuf>,
    profile: Option<String>,
}

impl LocalDataDirs {
    /// System local data directory, profile taken from `CN_PROFILE`.
    pub fn from_env() -> Self {
        Self {
            base: None,
            profile: std::env::var(PROFILE_ENV).ok(),
        }
    }

    /// Resolve under `base` instead of the system local data directory.
    pub fn under(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    fn base(&self) -> Option<PathBuf> {
        self.base.clone().or_else(dirs::data_local_dir)
    }
}

impl AppDirsPort for LocalDataDirs {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base = self.base().ok_or(AppDirsError::DataDirUnavailable)?;
        Ok(AppDirs::new(
            base.join(data_root_name(self.profile.as_deref())),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn profile_selects_the_directory_name() {
        assert_eq!(data_root_name(None), "clipnote");
        assert_eq!(data_root_name(Some("")), "clipnote");
        assert_eq!(data_root_name(Some("  ")), "clipnote");
        assert_eq!(data_root_name(Some("work")), "clipnote-work");
    }

    #[test]
    fn roots_are_resolved_under_the_base() {
        let default = LocalDataDirs::under("/data").get_app_dirs().unwrap();
        let work = LocalDataDirs::under("/data")
            .with_profile("work")
            .get_app_dirs()
            .unwrap();

        assert_eq!(default.root(), Path::new("/data/clipnote"));
        assert_eq!(work.root(), Path::new("/data/clipnote-work"));
    }
}
