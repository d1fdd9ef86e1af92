//! SQLite key-value backing store.

use derive_new::new;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::persistence::{PersistenceError, SnapshotStore, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Insertable row for a saved game.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::saved_games)]
struct NewSavedGameRow<'a> {
    save_key: &'a str,
    record: &'a str,
}

/// Stores records in a `saved_games` table keyed by save key.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns a store-unavailable error if the database cannot be opened
    /// or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, PersistenceError> {
        info!(path = %db_path, "Opening SqliteStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            PersistenceError::unavailable(format!(
                "Failed to migrate '{}': {}",
                store.db_path, e
            ))
        })?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(store)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, PersistenceError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            PersistenceError::unavailable(format!(
                "Failed to connect to '{}': {}",
                self.db_path, e
            ))
        })
    }
}

impl SnapshotStore for SqliteStore {
    #[instrument(skip(self, record))]
    fn put(&mut self, key: &str, record: &str) -> Result<(), PersistenceError> {
        let mut conn = self.connection()?;
        diesel::replace_into(schema::saved_games::table)
            .values(&NewSavedGameRow::new(key, record))
            .execute(&mut conn)?;
        debug!(bytes = record.len(), "Record stored");
        Ok(())
    }

    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let mut conn = self.connection()?;
        let record = schema::saved_games::table
            .find(key)
            .select(schema::saved_games::record)
            .first::<String>(&mut conn)
            .optional()?;
        Ok(record)
    }

    /// Lists keys in ascending key order.
    #[instrument(skip(self))]
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, PersistenceError> {
        let mut conn = self.connection()?;
        let keys = schema::saved_games::table
            .filter(schema::saved_games::save_key.like(format!("{}%", prefix)))
            .select(schema::saved_games::save_key)
            .order(schema::saved_games::save_key.asc())
            .load::<String>(&mut conn)?;

        // LIKE treats '_' as a wildcard.
        let keys: Vec<String> = keys.into_iter().filter(|k| k.starts_with(prefix)).collect();
        debug!(count = keys.len(), "Keys listed");
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn setup_store() -> (NamedTempFile, SqliteStore) {
        let db_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = db_file.path().to_str().expect("Invalid path").to_string();
        let store = SqliteStore::open(db_path).expect("Failed to open store");
        (db_file, store)
    }

    #[test]
    fn test_open_keeps_path() {
        let (db, store) = setup_store();
        assert_eq!(Some(store.db_path()), db.path().to_str());
    }

    #[test]
    fn test_put_replaces_record() {
        let (_db, mut store) = setup_store();
        store.put("tictactoe_a", "one").expect("Put failed");
        store.put("tictactoe_a", "two").expect("Put failed");
        assert_eq!(
            store.get("tictactoe_a").expect("Get failed"),
            Some("two".to_string())
        );
        assert_eq!(store.list_keys("").expect("List failed").len(), 1);
    }

    #[test]
    fn test_like_wildcard_does_not_leak() {
        let (_db, mut store) = setup_store();
        store.put("tictactoe_a", "{}").expect("Put failed");
        store.put("tictactoeXb", "{}").expect("Put failed");
        assert_eq!(
            store.list_keys("tictactoe_").expect("List failed"),
            vec!["tictactoe_a".to_string()]
        );
    }

    #[test]
    fn test_reopen_keeps_records() {
        let (db, mut store) = setup_store();
        store.put("tictactoe_a", "{}").expect("Put failed");
        let path = db.path().to_str().expect("Invalid path").to_string();
        let reopened = SqliteStore::open(path).expect("Reopen failed");
        assert!(reopened.get("tictactoe_a").expect("Get failed").is_some());
    }
}
