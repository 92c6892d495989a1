//! Process bootstrap: config loading, tracing and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_or_default, save_theme};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{
    resolve_settings, spawn_clipboard_runtime, wire_dependencies, AppContext, ClipboardRuntime,
    Overrides, ResolvedSettings, WiringError,
};
