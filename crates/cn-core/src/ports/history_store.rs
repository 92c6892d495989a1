use async_trait::async_trait;

use crate::ports::errors::HistoryError;

/// Persistence of an ordered list of strings (clipboard history, pinned items).
///
/// Implementations rewrite the whole list on every `save`.
///
/// 有序字符串列表的持久化端口，每次保存都整体重写。
#[async_trait]
pub trait HistoryStorePort: Send + Sync {
    /// Load the persisted list. A missing store yields an empty list;
    /// unparsable content yields [`HistoryError::Malformed`].
    async fn load(&self) -> Result<Vec<String>, HistoryError>;

    /// Overwrite the persisted list.
    async fn save(&self, entries: &[String]) -> Result<(), HistoryError>;
}
