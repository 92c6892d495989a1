pub mod clipboard;
pub mod event_bus;
pub mod runtime;
