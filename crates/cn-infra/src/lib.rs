pub mod clipboard;
pub mod notes;

pub use clipboard::JsonListFile;
pub use notes::{FsNotesRepository, HttpNotesConfig, HttpNotesRepository};
