//! Complete serializable state of one game session.

use super::types::{Board, Player};
use derive_getters::Getters;
use tracing::instrument;

/// Snapshot of a game session at a point in time.
///
/// This is the unit of persistence: the engine produces one on demand and
/// can be rebuilt from one after loading.
///
/// Equality compares play state only. Two snapshots with the same board,
/// turn, scores, mode and difficulty are equal whatever their timestamps.
#[derive(Debug, Clone, Getters)]
pub struct GameSnapshot {
    /// The board.
    board: Board,
    /// Player whose mark the next accepted move places.
    current_turn: Player,
    /// Games won by X.
    score_x: u32,
    /// Games won by O.
    score_o: u32,
    /// False once a win or draw has been detected.
    active: bool,
    /// Save time in milliseconds since the Unix epoch; `None` until stamped.
    timestamp: Option<i64>,
    /// Carried through persistence; no computer player acts on it.
    single_player_mode: bool,
    /// Carried through persistence; no computer player acts on it.
    computer_difficulty: i32,
}

impl GameSnapshot {
    /// Creates a fresh snapshot: empty board, X to move, zero scores, active.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: Player::X,
            score_x: 0,
            score_o: 0,
            active: true,
            timestamp: None,
            single_player_mode: false,
            computer_difficulty: 0,
        }
    }

    /// Returns the score of `player`.
    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::X => self.score_x,
            Player::O => self.score_o,
        }
    }

    /// Replaces the board.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    /// Sets the player to move.
    pub fn set_current_turn(&mut self, player: Player) {
        self.current_turn = player;
    }

    /// Sets both scores.
    pub fn set_scores(&mut self, score_x: u32, score_o: u32) {
        self.score_x = score_x;
        self.score_o = score_o;
    }

    /// Sets whether further marks are accepted.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Sets or clears the timestamp.
    pub fn set_timestamp(&mut self, timestamp: Option<i64>) {
        self.timestamp = timestamp;
    }

    /// Returns a copy stamped with `timestamp` (milliseconds since epoch).
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the single-player flag.
    pub fn set_single_player_mode(&mut self, single_player_mode: bool) {
        self.single_player_mode = single_player_mode;
    }

    /// Sets the computer difficulty.
    pub fn set_computer_difficulty(&mut self, computer_difficulty: i32) {
        self.computer_difficulty = computer_difficulty;
    }

    pub(super) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(super) fn award_point(&mut self, player: Player) {
        match player {
            Player::X => self.score_x += 1,
            Player::O => self.score_o += 1,
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for GameSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.current_turn == other.current_turn
            && self.score_x == other.score_x
            && self.score_o == other.score_o
            && self.single_player_mode == other.single_player_mode
            && self.computer_difficulty == other.computer_difficulty
    }
}

impl Eq for GameSnapshot {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Position, Square};

    #[test]
    fn test_equality_ignores_timestamp() {
        let a = GameSnapshot::new().with_timestamp(100);
        let b = GameSnapshot::new().with_timestamp(200);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_compares_board_cell_by_cell() {
        let a = GameSnapshot::new();
        let mut b = GameSnapshot::new();
        b.board_mut()
            .set(Position::BottomRight, Square::Occupied(Player::X));
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_compares_mode_and_difficulty() {
        let a = GameSnapshot::new();
        let mut b = GameSnapshot::new();
        b.set_computer_difficulty(2);
        assert_ne!(a, b);

        let mut c = GameSnapshot::new();
        c.set_single_player_mode(true);
        assert_ne!(a, c);
    }

    #[test]
    fn test_award_point() {
        let mut snapshot = GameSnapshot::new();
        snapshot.award_point(Player::O);
        snapshot.award_point(Player::O);
        assert_eq!(snapshot.score(Player::O), 2);
        assert_eq!(snapshot.score(Player::X), 0);
    }
}
