//! clipnote application layer
//!
//! Use cases over the ports defined in `cn-core`. Infrastructure and
//! platform adapters are injected by the binary.

pub mod app_paths;
pub mod usecases;

pub use app_paths::AppPaths;
