//! Conversion between game snapshots and saved-record text.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::GameSnapshot;
use crate::persistence::{PersistenceError, SavedGame, SnapshotStore};

/// Prefix shared by every save key.
pub const SAVE_KEY_PREFIX: &str = "tictactoe_";

/// Date shown for a record that could not be read.
pub const UNREADABLE_DATE: &str = "Unknown";

/// Description shown for a record that could not be read.
pub const UNREADABLE_DESCRIPTION: &str = "Unreadable save";

const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const KEY_DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One line of a saved-games listing.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct SnapshotSummary {
    /// Store key of the record.
    identifier: String,
    /// Save time as `dd/MM/yyyy HH:mm:ss` (UTC), or [`UNREADABLE_DATE`].
    date: String,
    /// `X: <n> - O: <n>`, or [`UNREADABLE_DESCRIPTION`].
    description: String,
    /// Save time in milliseconds, `None` when unreadable.
    timestamp: Option<i64>,
}

impl SnapshotSummary {
    /// Summary entry for a record that failed to load.
    pub fn unreadable(identifier: String) -> Self {
        Self::new(
            identifier,
            UNREADABLE_DATE.to_string(),
            UNREADABLE_DESCRIPTION.to_string(),
            None,
        )
    }

    /// Returns whether the record behind this entry could not be read.
    pub fn is_unreadable(&self) -> bool {
        self.timestamp.is_none()
    }
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn format_millis(millis: i64, format: &str) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.format(format).to_string())
}

/// Formats a timestamp for listings as `dd/MM/yyyy HH:mm:ss` (UTC).
pub fn display_date(millis: i64) -> String {
    format_millis(millis, DISPLAY_DATE_FORMAT).unwrap_or_else(|| UNREADABLE_DATE.to_string())
}

/// Builds the save key for a timestamp: `tictactoe_yyyyMMdd_HHmmss` (UTC).
pub fn save_key_for(millis: i64) -> String {
    let stamp = format_millis(millis, KEY_DATE_FORMAT).unwrap_or_else(|| millis.to_string());
    format!("{}{}", SAVE_KEY_PREFIX, stamp)
}

/// Encodes a snapshot as record text.
///
/// An unset timestamp is stamped with the current time.
///
/// # Errors
///
/// Returns an error if serialization fails.
#[instrument(skip(snapshot))]
pub fn encode(snapshot: &GameSnapshot) -> Result<String, PersistenceError> {
    let record = SavedGame::from_snapshot(snapshot, now_millis());
    let text = serde_json::to_string_pretty(&record)?;
    debug!(timestamp = record.timestamp, bytes = text.len(), "Snapshot encoded");
    Ok(text)
}

/// Decodes record text into a new snapshot.
///
/// # Errors
///
/// Returns a malformed-record error if the text is not a record, a required
/// field is missing or of the wrong kind, or the board is not 3x3.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn decode(text: &str) -> Result<GameSnapshot, PersistenceError> {
    let record: SavedGame = serde_json::from_str(text)?;
    record.into_snapshot()
}

/// Summarizes a single stored record.
#[instrument(skip(text))]
fn summarize(key: &str, text: &str) -> Result<SnapshotSummary, PersistenceError> {
    let snapshot = decode(text)?;
    let timestamp = snapshot
        .timestamp()
        .ok_or_else(|| PersistenceError::malformed("Decoded record has no timestamp"))?;
    Ok(SnapshotSummary::new(
        key.to_string(),
        display_date(timestamp),
        format!("X: {} - O: {}", snapshot.score_x(), snapshot.score_o()),
        Some(timestamp),
    ))
}

/// Lists every saved game in `store`, most recent first.
///
/// Records that cannot be read or decoded appear as
/// [unreadable](SnapshotSummary::unreadable) entries after the readable
/// ones. Equal timestamps keep the store's key order.
///
/// # Errors
///
/// Returns a store-unavailable error only if the keys cannot be listed.
#[instrument(skip(store))]
pub fn list_snapshots<S: SnapshotStore + ?Sized>(
    store: &S,
) -> Result<Vec<SnapshotSummary>, PersistenceError> {
    let keys = store.list_keys(SAVE_KEY_PREFIX)?;

    let mut summaries: Vec<SnapshotSummary> = keys
        .into_iter()
        .map(|key| {
            let summary = match store.get(&key) {
                Ok(Some(text)) => summarize(&key, &text),
                Ok(None) => Err(PersistenceError::not_found(key.clone())),
                Err(e) => Err(e),
            };
            summary.unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "Saved game is unreadable");
                SnapshotSummary::unreadable(key)
            })
        })
        .collect();

    // Stable sort; None sorts below every Some.
    summaries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    info!(count = summaries.len(), "Saved games listed");
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Player;

    #[test]
    fn test_save_key_format() {
        // 2024-03-05 07:08:09 UTC
        assert_eq!(save_key_for(1_709_622_489_000), "tictactoe_20240305_070809");
    }

    #[test]
    fn test_display_date_format() {
        assert_eq!(display_date(1_709_622_489_000), "05/03/2024 07:08:09");
    }

    #[test]
    fn test_encode_uses_record_key_names() {
        let text = encode(&GameSnapshot::new().with_timestamp(7)).expect("Encode failed");
        let value: serde_json::Value = serde_json::from_str(&text).expect("Invalid JSON");
        let object = value.as_object().expect("Not an object");
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        for key in [
            "gameBoard",
            "isXTurn",
            "scoreX",
            "scoreO",
            "timestamp",
            "singlePlayerMode",
            "computerDifficulty",
        ] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert_eq!(object["gameBoard"][1][1], "");
        assert_eq!(object["isXTurn"], true);
        assert_eq!(object["timestamp"], 7);
    }

    #[test]
    fn test_encode_stamps_unset_timestamp() {
        let before = now_millis();
        let snapshot = decode(&encode(&GameSnapshot::new()).expect("Encode failed"))
            .expect("Decode failed");
        let stamped = snapshot.timestamp().expect("No timestamp");
        assert!(stamped >= before);
    }

    #[test]
    fn test_decode_o_turn() {
        let text = r#"{
            "gameBoard": [["X","",""],["","",""],["","",""]],
            "isXTurn": false,
            "scoreX": 3,
            "scoreO": 4,
            "timestamp": 10,
            "singlePlayerMode": true,
            "computerDifficulty": 2
        }"#;
        let snapshot = decode(text).expect("Decode failed");
        assert_eq!(*snapshot.current_turn(), Player::O);
        assert_eq!(snapshot.score(Player::O), 4);
        assert!(*snapshot.single_player_mode());
        assert_eq!(*snapshot.computer_difficulty(), 2);
    }
}
