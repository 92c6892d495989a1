//! File-backed clipboard stores.
mod json_list_file;

pub use json_list_file::JsonListFile;
