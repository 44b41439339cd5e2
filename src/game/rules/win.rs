//! Win detection logic for N-in-a-row.

use super::super::Board;
use crate::players::PlayerId;
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// Scans every row top to bottom, then every column left to right, then the
/// main diagonal and finally the anti-diagonal. The first line whose slots are
/// all owned by the same player decides the result.
#[instrument(skip(board), fields(size = board.size()))]
pub fn check_winner(board: &Board) -> Option<PlayerId> {
    let n = board.size();

    let rows = (0..n).map(|x| line_owner(board, (0..n).map(move |y| (x, y))));
    let columns = (0..n).map(|y| line_owner(board, (0..n).map(move |x| (x, y))));
    let main = std::iter::once(line_owner(board, (0..n).map(|i| (i, i))));
    let anti = std::iter::once(line_owner(board, (0..n).map(|i| (i, n - 1 - i))));

    rows.chain(columns).chain(main).chain(anti).flatten().next()
}

/// Owner of a line when every slot in it belongs to the owner of the first.
fn line_owner(board: &Board, mut cells: impl Iterator<Item = (usize, usize)>) -> Option<PlayerId> {
    let (x, y) = cells.next()?;
    let candidate = board.owner_at(x, y)?;
    cells
        .all(|(x, y)| board.owner_at(x, y) == Some(candidate))
        .then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Slot;

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);

    fn place(board: &mut Board, cells: &[(usize, usize)], who: PlayerId) {
        for &(x, y) in cells {
            board.put(x, y, Slot::new(who)).unwrap();
        }
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new(3);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_every_row_and_column() {
        for n in 2..=5 {
            for line in 0..n {
                let mut board = Board::new(n);
                let row: Vec<_> = (0..n).map(|y| (line, y)).collect();
                place(&mut board, &row, B);
                assert_eq!(check_winner(&board), Some(B), "row {line} on {n}x{n}");

                let mut board = Board::new(n);
                let column: Vec<_> = (0..n).map(|x| (x, line)).collect();
                place(&mut board, &column, A);
                assert_eq!(check_winner(&board), Some(A), "column {line} on {n}x{n}");
            }
        }
    }

    #[test]
    fn test_diagonals() {
        let mut board = Board::new(4);
        place(&mut board, &[(0, 0), (1, 1), (2, 2), (3, 3)], A);
        assert_eq!(check_winner(&board), Some(A));

        let mut board = Board::new(4);
        place(&mut board, &[(0, 3), (1, 2), (2, 1), (3, 0)], B);
        assert_eq!(check_winner(&board), Some(B));
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let mut board = Board::new(3);
        place(&mut board, &[(0, 0), (0, 1)], A);
        place(&mut board, &[(0, 2)], B);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new(3);
        place(&mut board, &[(1, 0), (1, 1)], A);
        place(&mut board, &[(0, 0), (2, 2)], B);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_full_board_without_line() {
        // A B A / A B B / B A A
        let mut board = Board::new(3);
        place(&mut board, &[(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)], A);
        place(&mut board, &[(0, 1), (1, 1), (1, 2), (2, 0)], B);
        assert!(board.is_full());
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_same_owner_on_row_and_diagonal() {
        let mut board = Board::new(3);
        place(&mut board, &[(2, 0), (2, 1), (2, 2), (0, 0), (1, 1)], A);
        place(&mut board, &[(0, 1), (0, 2), (1, 0)], B);
        assert_eq!(check_winner(&board), Some(A));
    }

    #[test]
    fn test_idempotent() {
        let mut board = Board::new(3);
        place(&mut board, &[(0, 0), (1, 0), (2, 0)], A);
        assert_eq!(check_winner(&board), check_winner(&board));
    }
}
