//! # cn-core
//!
//! Core domain models and business rules for clipnote.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod app_dirs;
pub mod clipboard;
pub mod config;
pub mod network;
pub mod notes;
pub mod ports;

// Re-export commonly used types at the crate root
pub use clipboard::{AddOutcome, ClipboardHistory, PinnedItems, HISTORY_CAPACITY};
pub use config::{AppConfig, ThemeMode};
pub use network::Connectivity;
pub use notes::{Note, NoteTitle};
