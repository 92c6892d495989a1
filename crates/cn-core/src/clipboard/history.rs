use crate::ports::errors::HistoryError;

/// Maximum number of entries kept in the clipboard history.
pub const HISTORY_CAPACITY: usize = 30;

/// Result of offering a value to [`ClipboardHistory::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The value was appended. `evicted` holds the oldest entry if the
    /// capacity bound forced it out.
    Added { evicted: Option<String> },
    /// Empty strings are never recorded.
    Empty,
    /// The value is already somewhere in the history.
    Duplicate,
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }
}

/// Ordered, bounded, deduplicated list of clipboard text snapshots.
///
/// Index 0 is the oldest entry. New values are appended at the end and the
/// oldest value is evicted once the history holds [`HISTORY_CAPACITY`]
/// entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardHistory {
    entries: Vec<String>,
}

impl ClipboardHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from persisted entries.
    ///
    /// Entries are replayed through [`ClipboardHistory::add`], so empty
    /// values and duplicates are dropped and only the newest
    /// [`HISTORY_CAPACITY`] entries survive.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut history = Self::new();
        for entry in entries {
            history.add(entry);
        }
        history
    }

    pub fn add(&mut self, text: impl Into<String>) -> AddOutcome {
        let text = text.into();
        if text.is_empty() {
            return AddOutcome::Empty;
        }
        if self.contains(&text) {
            return AddOutcome::Duplicate;
        }

        let evicted = if self.entries.len() >= HISTORY_CAPACITY {
            Some(self.entries.remove(0))
        } else {
            None
        };

        #[cfg(feature = "tracing")]
        if let Some(old) = &evicted {
            tracing::debug!(evicted_len = old.len(), "history full, evicted oldest entry");
        }

        self.entries.push(text);
        AddOutcome::Added { evicted }
    }

    /// Remove the first exact match. Returns `false` when nothing matched.
    pub fn remove(&mut self, text: &str) -> bool {
        match self.position(text) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Substitute `old` with `new` at the same position.
    pub fn replace(&mut self, old: &str, new: impl Into<String>) -> Result<(), HistoryError> {
        let new = new.into();
        let idx = self
            .position(old)
            .ok_or_else(|| HistoryError::EntryNotFound(old.to_string()))?;

        if new.is_empty() {
            return Err(HistoryError::EmptyEntry);
        }
        if new != old && self.contains(&new) {
            return Err(HistoryError::DuplicateEntry(new));
        }

        self.entries[idx] = new;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e == text)
    }

    pub fn position(&self, text: &str) -> Option<usize> {
        self.entries.iter().position(|e| e == text)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Owned copy of the current entries, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_add_is_ignored() {
        let mut history = ClipboardHistory::new();
        history.add("a");
        history.add("b");
        let outcome = history.add("a");

        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(history.entries(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn empty_add_is_ignored() {
        let mut history = ClipboardHistory::new();
        assert_eq!(history.add(""), AddOutcome::Empty);
        assert!(history.is_empty());
    }

    #[test]
    fn thirty_first_add_evicts_oldest() {
        let mut history = ClipboardHistory::new();
        for i in 0..HISTORY_CAPACITY {
            assert!(history.add(format!("item-{i}")).is_added());
        }

        let outcome = history.add("item-30");

        assert_eq!(
            outcome,
            AddOutcome::Added {
                evicted: Some("item-0".to_string())
            }
        );
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert!(!history.contains("item-0"));
        assert_eq!(history.entries().first().map(String::as_str), Some("item-1"));
        assert_eq!(history.entries().last().map(String::as_str), Some("item-30"));
    }

    #[test]
    fn evicted_value_can_be_added_again() {
        let mut history = ClipboardHistory::new();
        for i in 0..=HISTORY_CAPACITY {
            history.add(format!("item-{i}"));
        }

        assert!(history.add("item-0").is_added());
        assert!(!history.contains("item-1"));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut history = ClipboardHistory::from_entries(vec!["a".to_string()]);
        assert!(!history.remove("zzz"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn remove_drops_value() {
        let mut history = ClipboardHistory::from_entries(vec!["a".into(), "b".into(), "c".into()]);
        assert!(history.remove("b"));
        assert_eq!(history.entries(), &["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut history = ClipboardHistory::from_entries(vec!["a".into(), "b".into(), "c".into()]);
        history.replace("b", "B").unwrap();

        assert_eq!(
            history.entries(),
            &["a".to_string(), "B".to_string(), "c".to_string()]
        );
        assert!(!history.contains("b"));
    }

    #[test]
    fn replace_missing_fails() {
        let mut history = ClipboardHistory::from_entries(vec!["a".into()]);
        let err = history.replace("x", "y").unwrap_err();
        assert!(matches!(err, HistoryError::EntryNotFound(v) if v == "x"));
    }

    #[test]
    fn replace_rejects_existing_value() {
        let mut history = ClipboardHistory::from_entries(vec!["a".into(), "b".into()]);
        let err = history.replace("a", "b").unwrap_err();
        assert!(matches!(err, HistoryError::DuplicateEntry(_)));
        assert_eq!(history.entries(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn replace_with_same_value_is_allowed() {
        let mut history = ClipboardHistory::from_entries(vec!["a".into()]);
        assert!(history.replace("a", "a").is_ok());
    }

    #[test]
    fn replace_rejects_empty_value() {
        let mut history = ClipboardHistory::from_entries(vec!["a".into()]);
        assert!(matches!(
            history.replace("a", ""),
            Err(HistoryError::EmptyEntry)
        ));
    }

    #[test]
    fn from_entries_normalises_oversized_input() {
        let mut raw: Vec<String> = (0..40).map(|i| format!("v{i}")).collect();
        raw.push("v39".to_string());
        raw.push(String::new());

        let history = ClipboardHistory::from_entries(raw);

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries().first().map(String::as_str), Some("v10"));
        assert_eq!(history.entries().last().map(String::as_str), Some("v39"));
    }
}
