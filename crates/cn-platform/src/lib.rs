//! # cn-platform
//!
//! Platform-specific implementations for clipnote.
//!
//! This crate contains the pieces that talk to the operating system: the
//! system clipboard, the per-user data directory, and the runtime that
//! drives the clipboard poller.

pub mod adapters;
pub mod app_dirs;
pub mod clipboard;
pub mod ipc;
pub mod runtime;
pub mod watch_lock;
