//! Property tests for the engine state machine and the codec round trip.
//!
//! Invariants covered:
//! - A mark on an occupied cell, off the board, or after the game ended
//!   changes nothing.
//! - Mark counts stay balanced (X equal to O or one ahead).
//! - Scores only grow by one, and only on a win.
//! - Decoding an encoded snapshot gives back an equal snapshot with the
//!   same timestamp.

use proptest::prelude::*;
use strictly_tictactoe_json::{
    BalancedMarksInvariant, GameEngine, GameStatus, Invariant, MarkOutcome, Position, Square,
    decode, encode,
};

fn moves() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..4, 0usize..4), 0..24)
}

proptest! {
    #[test]
    fn random_play_respects_core_invariants(moves in moves()) {
        let mut engine = GameEngine::new();

        for (row, col) in moves {
            let before = engine.clone();
            let occupied = Position::from_row_col(row, col)
                .map(|pos| before.board().get(pos) != Square::Empty)
                .unwrap_or(true);

            let outcome = engine.mark_cell(row, col);

            if occupied || before.is_terminal() {
                prop_assert_eq!(&outcome, &MarkOutcome::Ignored);
            }
            if outcome == MarkOutcome::Ignored {
                prop_assert_eq!(engine.board(), before.board());
                prop_assert_eq!(engine.status(), before.status());
                prop_assert_eq!(engine.current_turn(), before.current_turn());
                continue;
            }

            prop_assert!(BalancedMarksInvariant::holds(engine.snapshot()));

            let gained = (engine.score_x() + engine.score_o())
                - (before.score_x() + before.score_o());
            match engine.status() {
                GameStatus::Won(winner) => {
                    prop_assert_eq!(gained, 1);
                    prop_assert_eq!(winner, before.current_turn());
                    prop_assert!(!engine.winning_lines().is_empty());
                }
                GameStatus::Draw | GameStatus::InProgress => prop_assert_eq!(gained, 0),
            }
        }
    }

    #[test]
    fn decode_inverts_encode(
        moves in moves(),
        score_x in 0u32..1000,
        score_o in 0u32..1000,
        timestamp in 0i64..4_000_000_000_000,
        single_player in any::<bool>(),
        difficulty in -5i32..5,
    ) {
        let mut engine = GameEngine::new();
        engine.set_single_player_mode(single_player);
        engine.set_computer_difficulty(difficulty);
        for (row, col) in moves {
            engine.mark_cell(row, col);
        }
        let mut snapshot = engine.to_snapshot().with_timestamp(timestamp);
        snapshot.set_scores(score_x, score_o);

        let decoded = decode(&encode(&snapshot).expect("Encode failed")).expect("Decode failed");

        prop_assert_eq!(&decoded, &snapshot);
        prop_assert_eq!(*decoded.timestamp(), Some(timestamp));
        prop_assert_eq!(*decoded.active(), !engine.is_terminal());
    }
}
