//! Saving, loading and listing games.
//!
//! Records are JSON objects (see [`SavedGame`]) kept in any
//! [`SnapshotStore`]: memory, a directory of files, or SQLite.

mod codec;
mod error;
mod file_store;
mod record;
mod repository;
mod schema; // Diesel generated schema - internal use only
mod sqlite_store;
mod store;

pub use codec::{
    SAVE_KEY_PREFIX, SnapshotSummary, UNREADABLE_DATE, UNREADABLE_DESCRIPTION, decode,
    display_date, encode, list_snapshots, now_millis, save_key_for,
};
pub use error::{PersistenceError, PersistenceErrorKind};
pub use file_store::FileStore;
pub use record::SavedGame;
pub use repository::SaveRepository;
pub use sqlite_store::SqliteStore;
pub use store::{MemoryStore, SnapshotStore};
