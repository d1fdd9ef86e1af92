//! Backing-store abstraction for saved games.

use crate::persistence::PersistenceError;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// A key-value store holding whole record texts.
///
/// Each call reads or writes a whole record and is durable once it returns.
/// Implementations do not coordinate between processes.
pub trait SnapshotStore {
    /// Stores `record` under `key`, replacing any existing record.
    ///
    /// # Errors
    ///
    /// Returns a store-unavailable error if the write fails.
    fn put(&mut self, key: &str, record: &str) -> Result<(), PersistenceError>;

    /// Reads the record under `key`, `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns a store-unavailable error if the read fails.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Lists keys starting with `prefix` in the store's own order.
    ///
    /// # Errors
    ///
    /// Returns a store-unavailable error if the store cannot be enumerated.
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, PersistenceError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn put(&mut self, key: &str, record: &str) -> Result<(), PersistenceError> {
        (**self).put(key, record)
    }

    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, PersistenceError> {
        (**self).list_keys(prefix)
    }
}

/// In-process store; keys enumerate in sorted order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    #[instrument(skip(self, record))]
    fn put(&mut self, key: &str, record: &str) -> Result<(), PersistenceError> {
        debug!(bytes = record.len(), "Storing record in memory");
        self.records.insert(key.to_string(), record.to_string());
        Ok(())
    }

    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.records.get(key).cloned())
    }

    #[instrument(skip(self))]
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, PersistenceError> {
        Ok(self
            .records
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
