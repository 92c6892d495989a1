//! JSON list file tests
//! JSON 列表文件测试

use cn_core::ports::{HistoryError, HistoryStorePort};
use cn_infra::clipboard::JsonListFile;

const HISTORY_FILE_NAME: &str = "clipboard_history.json";
use tempfile::TempDir;

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonListFile::new(dir.path().join(HISTORY_FILE_NAME));

    let entries = store.load().await.unwrap();

    assert!(entries.is_empty());
    assert!(!store.path().exists(), "load must not create the file");
}

#[tokio::test]
async fn test_save_then_load_keeps_order() {
    let dir = TempDir::new().unwrap();
    let store = JsonListFile::new(dir.path().join(HISTORY_FILE_NAME));
    let entries = vec!["first".to_string(), "second\nline".to_string(), "ünïcode".to_string()];

    store.save(&entries).await.unwrap();

    assert_eq!(store.load().await.unwrap(), entries);
}

#[tokio::test]
async fn test_file_is_a_plain_json_array() {
    let dir = TempDir::new().unwrap();
    let store = JsonListFile::new(dir.path().join(HISTORY_FILE_NAME));

    store
        .save(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, serde_json::json!(["a", "b"]));
}

#[tokio::test]
async fn test_save_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let store = JsonListFile::new(dir.path().join("nested/deeper").join(HISTORY_FILE_NAME));

    store.save(&["x".to_string()]).await.unwrap();

    assert!(store.path().exists());
}

#[tokio::test]
async fn test_malformed_file_fails_fast() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(HISTORY_FILE_NAME);
    std::fs::write(&path, "{not json").unwrap();
    let store = JsonListFile::new(&path);

    let err = store.load().await.unwrap_err();

    assert!(matches!(err, HistoryError::Malformed { .. }));
    // the broken file is left untouched for inspection
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
}

#[tokio::test]
async fn test_non_string_array_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(HISTORY_FILE_NAME);
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let err = JsonListFile::new(&path).load().await.unwrap_err();

    assert!(matches!(err, HistoryError::Malformed { .. }));
}

#[tokio::test]
async fn test_malformed_pinned_file_is_not_called_history() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pinned_items.json");
    std::fs::write(&path, "not a list").unwrap();

    let message = JsonListFile::new(&path).load().await.unwrap_err().to_string();

    assert!(message.starts_with("list file is malformed"), "{message}");
    assert!(message.contains("pinned_items.json"), "{message}");
}
