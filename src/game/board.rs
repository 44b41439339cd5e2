//! Square N×N board of player-owned slots.

use crate::error::{GameError, GameErrorKind, GameResult};
use crate::players::PlayerId;
use tracing::{debug, instrument};

/// A proposed grid coordinate: `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new)]
pub struct Move {
    /// Row.
    pub x: usize,
    /// Column.
    pub y: usize,
}

/// Occupancy record of a board cell.
///
/// Immutable once placed; refers back to the player that placed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    owner: PlayerId,
}

impl Slot {
    /// Creates a slot owned by `owner`.
    pub fn new(owner: PlayerId) -> Self {
        Self { owner }
    }

    /// Returns the player that placed this slot.
    pub fn owner(&self) -> PlayerId {
        self.owner
    }
}

/// N×N game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Slots in row-major order.
    grid: Vec<Option<Slot>>,
}

impl Board {
    /// Creates an empty board of `size` × `size` slots.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            grid: vec![None; size * size],
        }
    }

    /// Board dimension N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.size
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.size
    }

    fn index(&self, x: usize, y: usize) -> GameResult<usize> {
        if x >= self.size || y >= self.size {
            return Err(GameError::new(GameErrorKind::OutOfRange {
                x,
                y,
                size: self.size,
            }));
        }
        Ok(x * self.size + y)
    }

    /// Returns the slot at row `x`, column `y`.
    pub fn at(&self, x: usize, y: usize) -> GameResult<Option<&Slot>> {
        let index = self.index(x, y)?;
        Ok(self.grid[index].as_ref())
    }

    /// Places `slot` at row `x`, column `y`.
    ///
    /// Fails with `SlotOccupied` without touching the board if the cell
    /// already holds a mark.
    #[instrument(skip(self))]
    pub fn put(&mut self, x: usize, y: usize, slot: Slot) -> GameResult<()> {
        let index = self.index(x, y)?;
        let cell = &mut self.grid[index];
        if cell.is_some() {
            debug!("Slot already occupied");
            return Err(GameError::new(GameErrorKind::SlotOccupied { x, y }));
        }
        *cell = Some(slot);
        Ok(())
    }

    /// Whether a mark can be placed at row `x`, column `y`.
    pub fn can_put(&self, x: usize, y: usize) -> bool {
        matches!(self.at(x, y), Ok(None))
    }

    /// Whether every slot holds a mark.
    pub fn is_full(&self) -> bool {
        self.grid.iter().all(Option::is_some)
    }

    /// Empties every slot.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn clear(&mut self) {
        self.grid.iter_mut().for_each(|cell| *cell = None);
    }

    /// Free coordinates in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| Move::new(index / self.size, index % self.size))
    }

    /// Owner of the slot at `(x, y)`; `None` when empty or out of range.
    pub(crate) fn owner_at(&self, x: usize, y: usize) -> Option<PlayerId> {
        self.at(x, y).ok().flatten().map(Slot::owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(index: usize) -> Slot {
        Slot::new(PlayerId::new(index))
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(3);
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 3);
        assert_eq!(board.empty_cells().count(), 9);
        assert!(!board.is_full());
    }

    #[test]
    fn test_at_out_of_range() {
        let board = Board::new(3);
        let err = board.at(3, 0).unwrap_err();
        assert_eq!(
            err.kind(),
            &GameErrorKind::OutOfRange { x: 3, y: 0, size: 3 }
        );
        assert!(board.at(0, 7).is_err());
    }

    #[test]
    fn test_put_occupied_leaves_board_unchanged() {
        let mut board = Board::new(3);
        board.put(1, 1, slot(0)).unwrap();
        let before = board.clone();

        let err = board.put(1, 1, slot(1)).unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::SlotOccupied { x: 1, y: 1 });
        assert_eq!(board, before);
        assert_eq!(board.at(1, 1).unwrap().map(|s| s.owner()), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_can_put() {
        let mut board = Board::new(2);
        assert!(board.can_put(0, 1));
        board.put(0, 1, slot(0)).unwrap();
        assert!(!board.can_put(0, 1));
        assert!(!board.can_put(2, 0));
    }

    #[test]
    fn test_fill_then_clear() {
        for n in 1..=5 {
            let mut board = Board::new(n);
            for x in 0..n {
                for y in 0..n {
                    assert!(!board.is_full());
                    board.put(x, y, slot((x + y) % 2)).unwrap();
                }
            }
            assert!(board.is_full());
            assert_eq!(board.empty_cells().count(), 0);

            board.clear();
            assert!(!board.is_full());
            assert_eq!(board.empty_cells().count(), n * n);
        }
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::new(2);
        board.put(0, 0, slot(0)).unwrap();
        let cells: Vec<Move> = board.empty_cells().collect();
        assert_eq!(cells, vec![Move::new(0, 1), Move::new(1, 0), Move::new(1, 1)]);
    }
}
