//! Notes repositories: the local notes directory and the remote HTTP mirror.
mod fs_repo;
mod http_repo;

pub use fs_repo::FsNotesRepository;
pub use http_repo::{HttpNotesConfig, HttpNotesRepository};
