//! Clipboard history edits shared by `history` and a running `watch`.
//!
//! While `watch` runs it owns the history file, so edits are typed into its
//! stdin and hit the same in-memory history the poller writes to:
//!
//! ```text
//! list
//! remove <text>
//! replace <old> => <new>
//! clear
//! help
//! ```

use anyhow::{bail, Result};

use cn_app::usecases::ClipboardHistoryService;

use super::commands::preview;

pub const HELP: &str =
    "commands: list | remove <text> | replace <old> => <new> | clear | help";

const REPLACE_SEPARATOR: &str = " => ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEdit {
    List,
    Remove(String),
    Replace { old: String, new: String },
    Clear,
    Help,
}

impl HistoryEdit {
    /// Parse one line; blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (command, rest) = match line.trim_start().split_once(' ') {
            Some((command, rest)) => (command, rest),
            None => (line.trim(), ""),
        };

        let input = match command {
            "" => return Ok(None),
            "list" => HistoryEdit::List,
            "clear" => HistoryEdit::Clear,
            "help" => HistoryEdit::Help,
            "remove" if !rest.is_empty() => HistoryEdit::Remove(rest.to_string()),
            "replace" => match rest.split_once(REPLACE_SEPARATOR) {
                Some((old, new)) if !old.is_empty() => HistoryEdit::Replace {
                    old: old.to_string(),
                    new: new.to_string(),
                },
                _ => bail!("usage: replace <old> => <new>"),
            },
            "remove" => bail!("usage: remove <text>"),
            other => bail!("unknown command '{other}'; {HELP}"),
        };
        Ok(Some(input))
    }

    /// Apply the edit and describe the result. Removing an absent entry is
    /// not an error.
    pub async fn apply(self, history: &ClipboardHistoryService) -> Result<String> {
        Ok(match self {
            HistoryEdit::List => {
                let entries = history.all().await;
                if entries.is_empty() {
                    return Ok("Clipboard history is empty.".into());
                }
                entries
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| format!("{:>3}  {}", index + 1, preview(entry)))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            HistoryEdit::Remove(text) => {
                if history.remove(&text).await? {
                    "Removed.".into()
                } else {
                    "Not in history.".into()
                }
            }
            HistoryEdit::Replace { old, new } => {
                history.replace(&old, new).await?;
                "Replaced.".into()
            }
            HistoryEdit::Clear => {
                history.clear().await?;
                "Clipboard history cleared.".into()
            }
            HistoryEdit::Help => HELP.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cn_core::ports::HistoryStorePort;
    use cn_infra::JsonListFile;
    use tempfile::TempDir;

    #[test]
    fn parses_every_command() {
        assert_eq!(HistoryEdit::parse("list").unwrap(), Some(HistoryEdit::List));
        assert_eq!(HistoryEdit::parse("  clear\r\n").unwrap(), Some(HistoryEdit::Clear));
        assert_eq!(
            HistoryEdit::parse("remove two words").unwrap(),
            Some(HistoryEdit::Remove("two words".into()))
        );
        assert_eq!(
            HistoryEdit::parse("replace a b => c d").unwrap(),
            Some(HistoryEdit::Replace {
                old: "a b".into(),
                new: "c d".into()
            })
        );
        assert_eq!(HistoryEdit::parse("   ").unwrap(), None);
    }

    #[test]
    fn rejects_incomplete_commands() {
        assert!(HistoryEdit::parse("remove").is_err());
        assert!(HistoryEdit::parse("replace a").is_err());
        assert!(HistoryEdit::parse("frobnicate").is_err());
    }

    #[tokio::test]
    async fn edits_survive_the_next_capture() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clipboard_history.json");
        let store: Arc<dyn HistoryStorePort> = Arc::new(JsonListFile::new(&path));
        let history = ClipboardHistoryService::load(store.clone()).await.unwrap();

        history.add("secret".into()).await.unwrap();
        history.add("typo".into()).await.unwrap();
        HistoryEdit::Remove("secret".into()).apply(&history).await.unwrap();
        HistoryEdit::Replace {
            old: "typo".into(),
            new: "fixed".into(),
        }
        .apply(&history)
        .await
        .unwrap();
        history.add("next".into()).await.unwrap();

        assert_eq!(
            store.load().await.unwrap(),
            vec!["fixed".to_string(), "next".to_string()]
        );
    }

    #[tokio::test]
    async fn removing_an_absent_entry_is_reported_not_failed() {
        let dir = TempDir::new().unwrap();
        let store: Arc<dyn HistoryStorePort> =
            Arc::new(JsonListFile::new(dir.path().join("clipboard_history.json")));
        let history = ClipboardHistoryService::load(store).await.unwrap();

        let message = HistoryEdit::Remove("ghost".into()).apply(&history).await.unwrap();

        assert_eq!(message, "Not in history.");
    }
}
