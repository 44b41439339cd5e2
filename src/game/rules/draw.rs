//! Draw detection logic for N-in-a-row.

use super::super::Board;
use super::win::check_winner;
use tracing::instrument;

/// Checks if the round is a draw: every slot is taken and nobody owns a line.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Slot;
    use crate::players::PlayerId;

    fn fill(board: &mut Board, rows: &[&str]) {
        for (x, row) in rows.iter().enumerate() {
            for (y, mark) in row.chars().enumerate() {
                let owner = match mark {
                    'X' => PlayerId::new(0),
                    'O' => PlayerId::new(1),
                    _ => continue,
                };
                board.put(x, y, Slot::new(owner)).unwrap();
            }
        }
    }

    #[test]
    fn test_empty_board_not_draw() {
        assert!(!is_draw(&Board::new(3)));
    }

    #[test]
    fn test_draw_detection() {
        let mut board = Board::new(3);
        fill(&mut board, &["XOX", "OXX", "OXO"]);
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let mut board = Board::new(3);
        fill(&mut board, &["XXX", "OOX", "XOO"]);
        assert!(board.is_full());
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_partial_board_not_draw() {
        let mut board = Board::new(3);
        fill(&mut board, &["XO.", "...", "..."]);
        assert!(!is_draw(&board));
    }
}
