//! # Configuration Loader / 配置加载器
//!
//! Reads `config.toml` and maps it onto the [`AppConfig`] DTO.
//!
//! Pure data loading: no validation, missing keys take the DTO defaults.
//! 仅纯数据加载，不做校验。

use std::path::{Path, PathBuf};

use anyhow::Context;
use cn_core::config::{AppConfig, ThemeMode};
use tracing::debug;

/// Load configuration from a TOML file.
///
/// # Errors / 错误
///
/// - the file cannot be read
/// - the content is not valid TOML
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    Ok(AppConfig::from_toml(&toml_value))
}

/// Like [`load_config`], but an absent file yields the default configuration.
///
/// The config file is optional; a file that exists but cannot be parsed is
/// still an error.
pub fn load_config_or_default(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }
    load_config(config_path.to_path_buf())
}

/// Store `theme` as `[general] theme`, keeping every other key of the file.
///
/// A missing file is created with just that key.
pub fn save_theme(config_path: &Path, theme: ThemeMode) -> anyhow::Result<()> {
    let mut root = if config_path.exists() {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        toml::from_str::<toml::Table>(&content).context("Failed to parse config as TOML")?
    } else {
        toml::Table::new()
    };

    let general = root
        .entry("general")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let Some(general) = general.as_table_mut() else {
        anyhow::bail!("[general] in {} is not a table", config_path.display());
    };
    general.insert("theme".into(), toml::Value::String(theme.name().into()));

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(&root).context("Failed to serialize config")?;
    std::fs::write(config_path, content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    debug!(theme = theme.name(), "theme saved");
    Ok(())
}
