//! On-store shape of a saved game.

use crate::games::tictactoe::{
    Board, GameEngine, GameSnapshot, InvariantSet, Player, Position, SnapshotInvariants, Square,
};
use crate::persistence::PersistenceError;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// A saved game exactly as written to a store.
///
/// Keys are serialized in declaration order. Unknown keys are ignored when
/// reading, so newer writers stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    /// Three rows of three tokens: `"X"`, `"O"` or `""`.
    pub game_board: Vec<Vec<String>>,
    /// True when X is to move.
    pub is_x_turn: bool,
    /// Games won by X.
    pub score_x: u32,
    /// Games won by O.
    pub score_o: u32,
    /// Save time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Single-player flag.
    pub single_player_mode: bool,
    /// Computer difficulty.
    pub computer_difficulty: i32,
}

impl SavedGame {
    /// Freezes a snapshot into a record.
    ///
    /// An unset timestamp is stamped with `now_millis`.
    #[instrument(skip(snapshot))]
    pub fn from_snapshot(snapshot: &GameSnapshot, now_millis: i64) -> Self {
        let game_board = snapshot
            .board()
            .rows()
            .iter()
            .map(|row| row.iter().map(|sq| sq.token().to_string()).collect())
            .collect();

        Self {
            game_board,
            is_x_turn: *snapshot.current_turn() == Player::X,
            score_x: *snapshot.score_x(),
            score_o: *snapshot.score_o(),
            timestamp: snapshot.timestamp().unwrap_or(now_millis),
            single_player_mode: *snapshot.single_player_mode(),
            computer_difficulty: *snapshot.computer_difficulty(),
        }
    }

    /// Thaws the record into a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns a malformed-record error if the board has fewer than three
    /// rows, a row has fewer than three entries, or a token is not a mark.
    #[instrument(skip(self), fields(timestamp = self.timestamp))]
    pub fn into_snapshot(self) -> Result<GameSnapshot, PersistenceError> {
        if self.game_board.len() < 3 {
            return Err(PersistenceError::malformed(format!(
                "gameBoard has {} rows, expected 3",
                self.game_board.len()
            )));
        }

        let mut board = Board::new();
        for (row, entries) in self.game_board.iter().take(3).enumerate() {
            if entries.len() < 3 {
                return Err(PersistenceError::malformed(format!(
                    "gameBoard row {} has {} entries, expected 3",
                    row,
                    entries.len()
                )));
            }
            for (col, token) in entries.iter().take(3).enumerate() {
                let square = Square::from_token(token).ok_or_else(|| {
                    PersistenceError::malformed(format!(
                        "gameBoard[{}][{}] has unknown mark '{}'",
                        row, col, token
                    ))
                })?;
                if let Some(pos) = Position::from_row_col(row, col) {
                    board.set(pos, square);
                }
            }
        }

        let mut snapshot = GameSnapshot::new();
        snapshot.set_board(board);
        snapshot.set_current_turn(if self.is_x_turn { Player::X } else { Player::O });
        snapshot.set_scores(self.score_x, self.score_o);
        snapshot.set_timestamp(Some(self.timestamp));
        snapshot.set_single_player_mode(self.single_player_mode);
        snapshot.set_computer_difficulty(self.computer_difficulty);

        // Active is not stored; it follows from the board.
        let active = !GameEngine::from_snapshot(snapshot.clone()).is_terminal();
        snapshot.set_active(active);

        if let Err(violations) = SnapshotInvariants::check_all(&snapshot) {
            for violation in violations {
                warn!(%violation, "Loaded snapshot violates invariant");
            }
        }

        Ok(snapshot)
    }
}
