//! Turn and score state machine for tic-tac-toe.
//!
//! The engine owns the active [`GameSnapshot`] and is the only thing that
//! mutates it. Invalid input is absorbed: marking an occupied cell, a cell
//! off the board, or any cell after the game has ended leaves the state
//! untouched and reports [`MarkOutcome::Ignored`].

use super::position::Position;
use super::rules::{self, Line};
use super::snapshot::GameSnapshot;
use super::types::{Board, Player, Square};
use tracing::{debug, info, instrument};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns whether the game has ended.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Result of a call to [`GameEngine::mark_cell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The mark was not placed; nothing changed.
    Ignored,
    /// The mark was placed and play passes to `next`.
    Continue {
        /// Player to move next.
        next: Player,
    },
    /// The mark completed one or more lines.
    Won {
        /// The player who placed the winning mark.
        winner: Player,
        /// Completed lines in row, column, diagonal scan order.
        lines: Vec<Line>,
    },
    /// The mark filled the board without completing a line.
    Draw,
}

/// Tic-tac-toe game engine.
#[derive(Debug, Clone)]
pub struct GameEngine {
    snapshot: GameSnapshot,
    status: GameStatus,
    winning_lines: Vec<Line>,
}

impl GameEngine {
    /// Creates a new game: empty board, X to move, zero scores.
    #[instrument]
    pub fn new() -> Self {
        Self {
            snapshot: GameSnapshot::new(),
            status: GameStatus::InProgress,
            winning_lines: Vec::new(),
        }
    }

    /// Rebuilds an engine from a loaded snapshot.
    ///
    /// Status is derived from the board: a completed line means the owner of
    /// the first such line won, otherwise a full board is a draw. Scores are
    /// taken as saved.
    #[instrument(skip(snapshot), fields(score_x = snapshot.score_x(), score_o = snapshot.score_o()))]
    pub fn from_snapshot(mut snapshot: GameSnapshot) -> Self {
        let (status, winning_lines) = match rules::check_winner(snapshot.board()) {
            Some((winner, line)) => (GameStatus::Won(winner), vec![line]),
            None if rules::is_full(snapshot.board()) => (GameStatus::Draw, Vec::new()),
            None => (GameStatus::InProgress, Vec::new()),
        };
        snapshot.set_active(!status.is_terminal());
        debug!(?status, "Engine restored from snapshot");
        Self {
            snapshot,
            status,
            winning_lines,
        }
    }

    /// Marks the cell at `row`, `col` for the player to move.
    ///
    /// Out-of-range coordinates are ignored like any other invalid move.
    #[instrument(skip(self), fields(player = ?self.snapshot.current_turn()))]
    pub fn mark_cell(&mut self, row: usize, col: usize) -> MarkOutcome {
        match Position::from_row_col(row, col) {
            Some(pos) => self.mark(pos),
            None => {
                debug!("Cell is off the board, ignoring");
                MarkOutcome::Ignored
            }
        }
    }

    /// Marks `pos` for the player to move.
    ///
    /// The win check runs before the full-board check, so a winning final
    /// mark is never reported as a draw.
    #[instrument(skip(self), fields(player = ?self.snapshot.current_turn()))]
    pub fn mark(&mut self, pos: Position) -> MarkOutcome {
        if self.status.is_terminal() {
            debug!(status = ?self.status, "Game is over, ignoring mark");
            return MarkOutcome::Ignored;
        }
        if !self.snapshot.board().is_empty(pos) {
            debug!("Square is occupied, ignoring mark");
            return MarkOutcome::Ignored;
        }

        let player = *self.snapshot.current_turn();
        self.snapshot.board_mut().set(pos, Square::Occupied(player));

        let lines = rules::completed_lines_through(self.snapshot.board(), pos);
        if !lines.is_empty() {
            self.status = GameStatus::Won(player);
            self.snapshot.award_point(player);
            self.snapshot.set_active(false);
            self.winning_lines = lines.clone();
            info!(
                winner = ?player,
                score_x = self.snapshot.score_x(),
                score_o = self.snapshot.score_o(),
                "Game won"
            );
            return MarkOutcome::Won {
                winner: player,
                lines,
            };
        }

        if rules::is_full(self.snapshot.board()) {
            self.status = GameStatus::Draw;
            self.snapshot.set_active(false);
            info!("Game drawn");
            return MarkOutcome::Draw;
        }

        let next = player.opponent();
        self.snapshot.set_current_turn(next);
        debug!(?next, "Turn passes");
        MarkOutcome::Continue { next }
    }

    /// Starts a new game: empty board, X to move, in progress.
    ///
    /// Scores survive when `keep_score` is true and drop to zero otherwise.
    #[instrument(skip(self))]
    pub fn reset(&mut self, keep_score: bool) {
        self.snapshot.board_mut().clear();
        self.snapshot.set_current_turn(Player::X);
        self.snapshot.set_active(true);
        self.snapshot.set_timestamp(None);
        if !keep_score {
            self.snapshot.set_scores(0, 0);
        }
        self.status = GameStatus::InProgress;
        self.winning_lines.clear();
        debug!(
            score_x = self.snapshot.score_x(),
            score_o = self.snapshot.score_o(),
            "Game reset"
        );
    }

    /// Returns whether the game has been won or drawn.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.snapshot.board()
    }

    /// Returns the player to move (the winner, once won).
    pub fn current_turn(&self) -> Player {
        *self.snapshot.current_turn()
    }

    /// Returns X's score.
    pub fn score_x(&self) -> u32 {
        *self.snapshot.score_x()
    }

    /// Returns O's score.
    pub fn score_o(&self) -> u32 {
        *self.snapshot.score_o()
    }

    /// Lines completed by the winning mark, empty unless won.
    pub fn winning_lines(&self) -> &[Line] {
        &self.winning_lines
    }

    /// First completed line in scan order, for callers that highlight one.
    pub fn winning_line(&self) -> Option<Line> {
        self.winning_lines.first().copied()
    }

    /// Returns the empty cells.
    pub fn available_moves(&self) -> Vec<Position> {
        if self.is_terminal() {
            return Vec::new();
        }
        Position::valid_moves(self.snapshot.board())
    }

    /// Sets the single-player flag carried in snapshots.
    pub fn set_single_player_mode(&mut self, single_player_mode: bool) {
        self.snapshot.set_single_player_mode(single_player_mode);
    }

    /// Sets the computer difficulty carried in snapshots.
    pub fn set_computer_difficulty(&mut self, computer_difficulty: i32) {
        self.snapshot.set_computer_difficulty(computer_difficulty);
    }

    /// Borrows the live snapshot.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Copies the live snapshot for saving.
    pub fn to_snapshot(&self) -> GameSnapshot {
        self.snapshot.clone()
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
