//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//!
//! > **This module contains data only, no policy, no validation.**
//! > Missing keys fall back to the documented defaults, and so do numbers
//! > that do not fit their field; everything else is taken as it is.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default port of the notes HTTP server.
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default timeout of the one-shot remote reachability probe.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3000;

/// Colour theme handed to whatever view layer renders the data.
///
/// 界面主题，以显式配置值传递给视图层。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

/// Colours of a theme: background, foreground, button background, button foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: &'static str,
    pub foreground: &'static str,
    pub button_background: &'static str,
    pub button_foreground: &'static str,
}

impl ThemeMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Name used in `config.toml`.
    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(self) -> ThemePalette {
        match self {
            ThemeMode::Dark => ThemePalette {
                background: "darkblue",
                foreground: "black",
                button_background: "darkgray",
                button_foreground: "black",
            },
            ThemeMode::Light => ThemePalette {
                background: "white",
                foreground: "black",
                button_background: "lightgray",
                button_foreground: "black",
            },
        }
    }
}

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// View theme.
    pub theme: ThemeMode,

    /// Data root override (empty means "use the platform data directory").
    pub data_dir: PathBuf,

    /// Base URL of the remote notes mirror (empty means "no mirror").
    pub remote_url: String,

    /// Timeout of the startup reachability probe, in milliseconds.
    pub probe_timeout_ms: u64,

    /// Port of the notes HTTP server.
    pub server_port: u16,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation.
    /// Empty strings are valid "facts"; unknown theme names fall back to
    /// the default theme.
    pub fn from_toml(toml_value: &toml::Value) -> Self {
        let mut config = Self::empty();

        if let Some(theme) = toml_value
            .get("general")
            .and_then(|g| g.get("theme"))
            .and_then(|v| v.as_str())
            .and_then(ThemeMode::from_name)
        {
            config.theme = theme;
        }

        config.data_dir = PathBuf::from(
            toml_value
                .get("storage")
                .and_then(|s| s.get("data_dir"))
                .and_then(|v| v.as_str())
                .unwrap_or(""),
        );

        config.remote_url = toml_value
            .get("remote")
            .and_then(|r| r.get("url"))
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        if let Some(timeout) = toml_value
            .get("remote")
            .and_then(|r| r.get("probe_timeout_ms"))
            .and_then(|v| v.as_integer())
        {
            config.probe_timeout_ms = timeout.max(0) as u64;
        }

        if let Some(port) = toml_value
            .get("server")
            .and_then(|s| s.get("port"))
            .and_then(|v| v.as_integer())
        {
            // out-of-range ports keep the default instead of wrapping
            config.server_port = u16::try_from(port).unwrap_or(DEFAULT_SERVER_PORT);
        }

        config
    }

    /// Create AppConfig with every field at its default.
    pub fn empty() -> Self {
        Self {
            theme: ThemeMode::default(),
            data_dir: PathBuf::new(),
            remote_url: String::new(),
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    pub fn has_remote(&self) -> bool {
        !self.remote_url.trim().is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_parses_all_sections() {
        let toml_str = r#"
            [general]
            theme = "light"

            [storage]
            data_dir = "/tmp/clipnote"

            [remote]
            url = "http://127.0.0.1:5000"
            probe_timeout_ms = 500

            [server]
            port = 8080
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value);

        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/clipnote"));
        assert_eq!(config.remote_url, "http://127.0.0.1:5000");
        assert_eq!(config.probe_timeout_ms, 500);
        assert_eq!(config.server_port, 8080);
        assert!(config.has_remote());
    }

    #[test]
    fn test_from_toml_uses_defaults_when_missing() {
        let toml_value: Value = toml::from_str("[general]").unwrap();

        let config = AppConfig::from_toml(&toml_value);

        assert_eq!(config, AppConfig::empty());
        assert!(!config.has_remote());
    }

    #[test]
    fn test_out_of_range_port_keeps_default() {
        for raw in ["[server]\nport = 99999", "[server]\nport = -1"] {
            let toml_value: Value = toml::from_str(raw).unwrap();

            let config = AppConfig::from_toml(&toml_value);

            assert_eq!(config.server_port, DEFAULT_SERVER_PORT, "{raw}");
        }
    }

    #[test]
    fn test_unknown_theme_keeps_default() {
        let toml_value: Value = toml::from_str("[general]\ntheme = \"neon\"").unwrap();

        let config = AppConfig::from_toml(&toml_value);

        assert_eq!(config.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_theme_toggle_round_trips() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().palette().background, "darkblue");
        assert_eq!(
            ThemeMode::from_name(ThemeMode::Light.name()),
            Some(ThemeMode::Light)
        );
    }
}
