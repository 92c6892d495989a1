//! Local notes directory tests
//! 本地笔记目录测试

use cn_core::notes::NoteTitle;
use cn_core::ports::{NotesError, NotesRepositoryPort};
use cn_infra::notes::FsNotesRepository;
use tempfile::TempDir;

fn title(raw: &str) -> NoteTitle {
    NoteTitle::parse(raw).unwrap()
}

#[tokio::test]
async fn test_write_then_read_round_trip() {
    let dir = TempDir::new().unwrap();
    let repo = FsNotesRepository::new(dir.path().join("notes"));

    repo.write(&title("todo"), "buy milk").await.unwrap();

    assert_eq!(repo.read(&title("todo")).await.unwrap(), "buy milk");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("notes/todo.txt")).unwrap(),
        "buy milk"
    );
}

#[tokio::test]
async fn test_write_overwrites_existing_note() {
    let dir = TempDir::new().unwrap();
    let repo = FsNotesRepository::new(dir.path());

    repo.write(&title("todo"), "v1").await.unwrap();
    repo.write(&title("todo"), "v2").await.unwrap();

    assert_eq!(repo.read(&title("todo")).await.unwrap(), "v2");
}

#[tokio::test]
async fn test_list_only_returns_txt_stems_sorted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("zeta.txt"), "z").unwrap();
    std::fs::write(dir.path().join("alpha.txt"), "a").unwrap();
    std::fs::write(dir.path().join("image.png"), "png").unwrap();
    std::fs::write(dir.path().join("README"), "no extension").unwrap();
    let repo = FsNotesRepository::new(dir.path());

    let titles = repo.list().await.unwrap();

    assert_eq!(titles, vec![title("alpha"), title("zeta")]);
}

#[tokio::test]
async fn test_list_creates_missing_dir() {
    let dir = TempDir::new().unwrap();
    let notes_dir = dir.path().join("notes");
    let repo = FsNotesRepository::new(&notes_dir);

    assert!(repo.list().await.unwrap().is_empty());
    assert!(notes_dir.is_dir());
}

#[tokio::test]
async fn test_read_missing_note_is_not_found() {
    let dir = TempDir::new().unwrap();
    let repo = FsNotesRepository::new(dir.path());

    let err = repo.read(&title("ghost")).await.unwrap_err();

    assert!(matches!(err, NotesError::NotFound(t) if t == "ghost"));
}

#[tokio::test]
async fn test_delete_removes_file_and_missing_delete_fails() {
    let dir = TempDir::new().unwrap();
    let repo = FsNotesRepository::new(dir.path());
    repo.write(&title("todo"), "x").await.unwrap();

    repo.delete(&title("todo")).await.unwrap();

    assert!(!dir.path().join("todo.txt").exists());
    assert!(matches!(
        repo.delete(&title("todo")).await,
        Err(NotesError::NotFound(_))
    ));
}
