//! Tic-tac-toe rules, state machine and snapshots.

mod engine;
mod invariants;
mod position;
pub mod rules;
mod snapshot;
mod types;

pub use engine::{GameEngine, GameStatus, MarkOutcome};
pub use invariants::{
    BalancedMarksInvariant, Invariant, InvariantSet, InvariantViolation, SnapshotInvariants,
    TurnMatchesMarksInvariant,
};
pub use position::Position;
pub use rules::Line;
pub use snapshot::GameSnapshot;
pub use types::{Board, Player, Square};
