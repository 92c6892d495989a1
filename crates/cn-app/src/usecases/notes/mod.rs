mod notes_service;

pub use notes_service::{NotesService, RemoteMirror};
