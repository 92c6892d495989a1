//! Note domain models.
//!
//! A note is addressed by its title; the title doubles as the file stem of
//! the note on disk, so it must name exactly one file inside the notes
//! directory.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ports::errors::NotesError;

/// File extension used for note files.
pub const NOTE_EXTENSION: &str = "txt";

/// Validated note title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NoteTitle(String);

impl NoteTitle {
    pub fn parse(raw: impl Into<String>) -> Result<Self, NotesError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(NotesError::Validation("note title is required".into()));
        }
        if raw == "." || raw == ".." {
            return Err(NotesError::Validation(format!(
                "note title '{raw}' is reserved"
            )));
        }
        if raw.contains(['/', '\\', '\0']) {
            return Err(NotesError::Validation(format!(
                "note title '{raw}' must not contain path separators"
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the note inside the notes directory.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, NOTE_EXTENSION)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NoteTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteTitle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NoteTitle::parse(raw).map_err(serde::de::Error::custom)
    }
}

/// A titled text document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: NoteTitle,
    pub content: String,
}

impl Note {
    pub fn new(title: NoteTitle, content: impl Into<String>) -> Self {
        Self {
            title,
            content: content.into(),
        }
    }

    /// Check the content rule applied on save.
    pub fn validate_content(content: &str) -> Result<(), NotesError> {
        if content.is_empty() {
            return Err(NotesError::Validation("note content is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_title_is_accepted() {
        let title = NoteTitle::parse("todo").unwrap();
        assert_eq!(title.file_name(), "todo.txt");
    }

    #[test]
    fn titles_with_spaces_are_accepted() {
        assert!(NoteTitle::parse("shopping list").is_ok());
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(matches!(
            NoteTitle::parse("   "),
            Err(NotesError::Validation(_))
        ));
    }

    #[test]
    fn path_like_titles_are_rejected() {
        for raw in ["../etc/passwd", "a/b", "a\\b", ".", ".."] {
            assert!(
                matches!(NoteTitle::parse(raw), Err(NotesError::Validation(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn empty_content_is_rejected() {
        assert!(Note::validate_content("").is_err());
        assert!(Note::validate_content("buy milk").is_ok());
    }

    #[test]
    fn title_deserialization_validates() {
        let err = toml::from_str::<std::collections::BTreeMap<String, NoteTitle>>("t = \"a/b\"");
        assert!(err.is_err());
    }
}
