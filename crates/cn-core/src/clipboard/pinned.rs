/// Items the user chose to keep regardless of history eviction.
///
/// Ordered by pin time and deduplicated, without a capacity bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinnedItems {
    items: Vec<String>,
}

impl PinnedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut pinned = Self::new();
        for item in items {
            pinned.pin(item);
        }
        pinned
    }

    /// Returns `true` if the item was newly pinned.
    pub fn pin(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.is_empty() || self.is_pinned(&text) {
            return false;
        }
        self.items.push(text);
        true
    }

    /// Returns `true` if the item was pinned before.
    pub fn unpin(&mut self, text: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i != text);
        before != self.items.len()
    }

    pub fn is_pinned(&self, text: &str) -> bool {
        self.items.iter().any(|i| i == text)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.items.clone()
    }
}
