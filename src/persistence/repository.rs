//! Save, load and list games over a backing store.

use tracing::{debug, info, instrument};

use crate::games::tictactoe::GameSnapshot;
use crate::persistence::{PersistenceError, SnapshotStore, SnapshotSummary, codec};

/// Repository of saved games.
///
/// Saved records are never overwritten: a save that would reuse an existing
/// key gets a numeric suffix instead.
#[derive(Debug, Clone)]
pub struct SaveRepository<S> {
    store: S,
}

impl<S: SnapshotStore> SaveRepository<S> {
    /// Wraps a backing store.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saves a snapshot and returns its key.
    ///
    /// The snapshot itself is not modified; an unset timestamp is stamped
    /// on the stored copy only.
    ///
    /// # Errors
    ///
    /// Returns a store-unavailable error if the store cannot be read or
    /// written.
    #[instrument(skip(self, snapshot), fields(score_x = snapshot.score_x(), score_o = snapshot.score_o()))]
    pub fn save(&mut self, snapshot: &GameSnapshot) -> Result<String, PersistenceError> {
        let timestamp = snapshot.timestamp().unwrap_or_else(codec::now_millis);
        let stamped = snapshot.clone().with_timestamp(timestamp);
        let text = codec::encode(&stamped)?;

        let key = self.free_key(&codec::save_key_for(timestamp))?;
        self.store.put(&key, &text)?;

        info!(key = %key, timestamp, "Game saved");
        Ok(key)
    }

    /// Loads the snapshot stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if there is no such key, a malformed-record
    /// error if the record cannot be decoded, or a store-unavailable error if
    /// the store cannot be read.
    #[instrument(skip(self))]
    pub fn load(&self, key: &str) -> Result<GameSnapshot, PersistenceError> {
        let text = self
            .store
            .get(key)?
            .ok_or_else(|| PersistenceError::not_found(key))?;
        let snapshot = codec::decode(&text)?;
        info!(key = %key, "Game loaded");
        Ok(snapshot)
    }

    /// Lists saved games, most recent first.
    ///
    /// # Errors
    ///
    /// Returns a store-unavailable error if the keys cannot be listed.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<SnapshotSummary>, PersistenceError> {
        codec::list_snapshots(&self.store)
    }

    /// First of `base`, `base_2`, `base_3`, ... not already in the store.
    fn free_key(&self, base: &str) -> Result<String, PersistenceError> {
        if self.store.get(base)?.is_none() {
            return Ok(base.to_string());
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{}_{}", base, n);
            if self.store.get(&candidate)?.is_none() {
                debug!(key = %candidate, "Base key taken, using suffix");
                return Ok(candidate);
            }
            n += 1;
        }
    }
}
