//! Strictly Tic-Tac-Toe JSON - a two-player game engine with save games.
//!
//! # Architecture
//!
//! - **Engine**: [`GameEngine`] owns the board, turn, scores and status;
//!   invalid moves are silently ignored
//! - **Snapshots**: [`GameSnapshot`] is the complete state of one session
//! - **Codec**: [`encode`] / [`decode`] convert snapshots to JSON records,
//!   [`list_snapshots`] enumerates a store most recent first
//! - **Stores**: [`MemoryStore`], [`FileStore`] and [`SqliteStore`] implement
//!   [`SnapshotStore`]
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe_json::{GameEngine, GameStatus, MemoryStore, Player, SaveRepository};
//!
//! # fn example() -> Result<(), strictly_tictactoe_json::PersistenceError> {
//! let mut engine = GameEngine::new();
//! for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
//!     engine.mark_cell(row, col);
//! }
//! assert_eq!(engine.status(), GameStatus::Won(Player::X));
//!
//! let mut repo = SaveRepository::new(MemoryStore::new());
//! let key = repo.save(engine.snapshot())?;
//! let restored = GameEngine::from_snapshot(repo.load(&key)?);
//! assert_eq!(restored.score_x(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod persistence;

// Crate-level exports - Configuration
pub use config::{ConfigError, SaveConfig, StoreBackend};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    BalancedMarksInvariant, Board, GameEngine, GameSnapshot, GameStatus, Invariant, InvariantSet,
    InvariantViolation, Line, MarkOutcome, Player, Position, SnapshotInvariants, Square,
    TurnMatchesMarksInvariant,
};

// Crate-level exports - Rules
pub use games::tictactoe::rules::{LINES, check_winner, completed_lines_through, is_full};

// Crate-level exports - Persistence
pub use persistence::{
    FileStore, MemoryStore, PersistenceError, PersistenceErrorKind, SAVE_KEY_PREFIX, SaveRepository,
    SavedGame, SnapshotStore, SnapshotSummary, SqliteStore, UNREADABLE_DATE,
    UNREADABLE_DESCRIPTION, decode, display_date, encode, list_snapshots, now_millis, save_key_for,
};
