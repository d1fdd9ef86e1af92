//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Position, Square};
use tracing::instrument;

/// Three positions forming a row, column or diagonal.
pub type Line = [Position; 3];

/// Every line on the board, in scan order: rows, then columns, then diagonals.
pub const LINES: [Line; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

fn line_owner(board: &Board, [a, b, c]: Line) -> Option<Player> {
    let sq = board.get(a);
    if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
        sq.player()
    } else {
        None
    }
}

/// Returns every completed line passing through `pos`, in scan order.
///
/// Used after a mark at `pos`: only lines through the new mark can have
/// been completed by it.
#[instrument(skip(board))]
pub fn completed_lines_through(board: &Board, pos: Position) -> Vec<Line> {
    LINES
        .iter()
        .copied()
        .filter(|line| line.contains(&pos))
        .filter(|line| line_owner(board, *line).is_some())
        .collect()
}

/// Scans the whole board for a winner.
///
/// Returns the owner and the first completed line in scan order,
/// `None` if no line is complete.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Player, Line)> {
    LINES
        .iter()
        .find_map(|line| line_owner(board, *line).map(|p| (p, *line)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::TopCenter, Square::Occupied(Player::X));
        board.set(Position::TopRight, Square::Occupied(Player::X));
        assert_eq!(check_winner(&board), Some((Player::X, LINES[0])));
    }

    #[test]
    fn test_winner_diagonal() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::O));
        board.set(Position::Center, Square::Occupied(Player::O));
        board.set(Position::BottomRight, Square::Occupied(Player::O));
        assert_eq!(check_winner(&board), Some((Player::O, LINES[6])));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::TopCenter, Square::Occupied(Player::X));
        assert_eq!(check_winner(&board), None);
        assert!(completed_lines_through(&board, Position::TopCenter).is_empty());
    }

    #[test]
    fn test_center_completes_several_lines_in_scan_order() {
        // X X . / X . X / . X X with center still empty, then X takes center:
        // middle row, center column and main diagonal all complete.
        let x = Square::Occupied(Player::X);
        let e = Square::Empty;
        let mut board = Board::from_squares([x, x, e, x, e, x, e, x, x]);
        board.set(Position::Center, x);

        let lines = completed_lines_through(&board, Position::Center);
        assert_eq!(lines, vec![LINES[1], LINES[4], LINES[6]]);
        assert_eq!(check_winner(&board), Some((Player::X, LINES[1])));
    }

    #[test]
    fn test_lines_not_through_position_are_ignored() {
        let mut board = Board::new();
        for pos in LINES[2] {
            board.set(pos, Square::Occupied(Player::O));
        }
        assert!(completed_lines_through(&board, Position::TopLeft).is_empty());
        assert_eq!(
            completed_lines_through(&board, Position::BottomCenter),
            vec![LINES[2]]
        );
    }
}
