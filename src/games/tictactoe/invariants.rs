//! First-class invariants for tic-tac-toe snapshots.
//!
//! Saved records come from outside the engine, so these checks are run on
//! every decoded snapshot. Violations are reported, not rejected.

use super::{GameSnapshot, Player};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: X has as many marks as O, or exactly one more.
pub struct BalancedMarksInvariant;

impl Invariant<GameSnapshot> for BalancedMarksInvariant {
    fn holds(snapshot: &GameSnapshot) -> bool {
        let x = snapshot.board().count(Player::X);
        let o = snapshot.board().count(Player::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X has as many marks as O, or one more"
    }
}

/// Invariant: in an active game, X moves when the counts are equal and O
/// moves when X is one ahead.
pub struct TurnMatchesMarksInvariant;

impl Invariant<GameSnapshot> for TurnMatchesMarksInvariant {
    fn holds(snapshot: &GameSnapshot) -> bool {
        if !*snapshot.active() {
            return true;
        }
        let x = snapshot.board().count(Player::X);
        let o = snapshot.board().count(Player::O);
        let expected = if x == o { Player::X } else { Player::O };
        *snapshot.current_turn() == expected
    }

    fn description() -> &'static str {
        "Turn alternates X, O, X, ... starting with X"
    }
}

/// All snapshot invariants.
pub type SnapshotInvariants = (BalancedMarksInvariant, TurnMatchesMarksInvariant);
