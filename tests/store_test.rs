//! Save/load/list through each backing store.

use tempfile::{NamedTempFile, TempDir};

use strictly_tictactoe_json::{
    FileStore, GameEngine, GameStatus, MemoryStore, PersistenceError, Player, SaveRepository,
    SnapshotStore, SqliteStore,
};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_sqlite() -> (NamedTempFile, SaveRepository<SqliteStore>) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::open(db_path).expect("Failed to open store");
    (db_file, SaveRepository::new(store))
}

fn setup_files() -> (TempDir, SaveRepository<FileStore>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path().join("saves"));
    (dir, SaveRepository::new(store))
}

fn won_engine() -> GameEngine {
    let mut engine = GameEngine::new();
    for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
        engine.mark_cell(row, col);
    }
    engine
}

fn save_load_list<S: SnapshotStore>(repo: &mut SaveRepository<S>) {
    let mut engine = won_engine();
    let first = repo
        .save(&engine.to_snapshot().with_timestamp(100_000))
        .expect("Save failed");

    engine.reset(true);
    engine.mark_cell(1, 1);
    let second = repo
        .save(&engine.to_snapshot().with_timestamp(200_000))
        .expect("Save failed");

    let summaries = repo.list().expect("List failed");
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].identifier(), &second);
    assert_eq!(summaries[1].identifier(), &first);
    assert_eq!(summaries[1].date(), "01/01/1970 00:01:40");
    assert_eq!(summaries[1].description(), "X: 1 - O: 0");

    let restored = GameEngine::from_snapshot(repo.load(&first).expect("Load failed"));
    assert_eq!(restored.status(), GameStatus::Won(Player::X));
    assert_eq!(restored.score_x(), 1);

    let mut restored = GameEngine::from_snapshot(repo.load(&second).expect("Load failed"));
    assert_eq!(restored.status(), GameStatus::InProgress);
    assert_eq!(restored.current_turn(), Player::O);
    assert_eq!(restored.score_x(), 1);
    restored.mark_cell(0, 0);
    assert_eq!(restored.current_turn(), Player::X);
}

#[test]
fn test_file_store_save_load_list() {
    let (_dir, mut repo) = setup_files();
    save_load_list(&mut repo);
}

#[test]
fn test_sqlite_store_save_load_list() {
    let (_db, mut repo) = setup_sqlite();
    save_load_list(&mut repo);
}

#[test]
fn test_memory_store_save_load_list() {
    let mut repo = SaveRepository::new(MemoryStore::new());
    save_load_list(&mut repo);
}

#[test]
fn test_file_store_unreadable_file_listed() {
    let (dir, mut repo) = setup_files();
    repo.save(&won_engine().to_snapshot().with_timestamp(1_000))
        .expect("Save failed");
    std::fs::write(dir.path().join("saves/tictactoe_broken.json"), "{ not json")
        .expect("Write failed");

    let summaries = repo.list().expect("List failed");
    assert_eq!(summaries.len(), 2);
    assert!(!summaries[0].is_unreadable());
    assert_eq!(summaries[1].identifier(), "tictactoe_broken");
    assert!(summaries[1].is_unreadable());

    let err = repo.load("tictactoe_broken").unwrap_err();
    assert!(err.is_malformed());
}

/// Store that refuses every write.
struct ReadOnlyStore(MemoryStore);

impl SnapshotStore for ReadOnlyStore {
    fn put(&mut self, _key: &str, _record: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::unavailable("read-only"))
    }

    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.0.get(key)
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, PersistenceError> {
        self.0.list_keys(prefix)
    }
}

#[test]
fn test_failed_save_leaves_game_playable() {
    let mut repo = SaveRepository::new(ReadOnlyStore(MemoryStore::new()));
    let mut engine = GameEngine::new();
    engine.mark_cell(0, 0);
    let before = engine.to_snapshot();

    let err = repo.save(engine.snapshot()).unwrap_err();

    assert!(err.is_unavailable());
    assert_eq!(engine.snapshot(), &before);
    assert_eq!(*engine.snapshot().timestamp(), None);
    engine.mark_cell(1, 1);
    assert_eq!(engine.current_turn(), Player::X);
}
