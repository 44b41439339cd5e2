//! Rendering collaborator.
//!
//! The game core hands semantic state to a [`Renderer`]: board cells with
//! occupant symbols and a cursor flag, the player list with the current turn,
//! and modal dialogs. Glyph and layout assembly lives behind the trait.

mod dialog;
mod ui;

pub use dialog::{Button, DialogChoice, MessageDialog};
pub use ui::TerminalRenderer;

use crate::error::GameResult;
use crate::players::PlayerInfo;
use crate::stats::StatsReport;

/// One board cell as the renderer should show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Symbol of the occupying player.
    pub symbol: Option<char>,
    /// Whether the human cursor sits on this cell.
    pub cursor: bool,
}

/// Everything needed to paint the board screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Game title.
    pub title: String,
    /// Board dimension N.
    pub size: usize,
    /// N×N cells in row-major order.
    pub cells: Vec<CellView>,
    /// Players in seat order.
    pub players: Vec<PlayerInfo>,
    /// Seat of the player to move.
    pub turn: usize,
}

impl BoardView {
    /// Cell at row `x`, column `y`.
    pub fn cell(&self, x: usize, y: usize) -> Option<&CellView> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells.get(x * self.size + y)
    }

    /// Whether any cell carries the cursor.
    pub fn shows_cursor(&self) -> bool {
        self.cells.iter().any(|cell| cell.cursor)
    }
}

/// A modal dialog as the renderer should show it.
#[derive(Debug, Clone, Copy)]
pub struct DialogView<'a> {
    /// Message lines.
    pub messages: &'a [String],
    /// Buttons in display order.
    pub buttons: &'a [Button],
    /// Index of the highlighted button.
    pub highlighted: usize,
}

/// Paints game state to the terminal.
pub trait Renderer {
    /// Paints the board, the player list and the turn hint.
    fn draw_board(&mut self, view: &BoardView) -> GameResult<()>;

    /// Paints a dialog on top of the last board.
    fn draw_dialog(&mut self, view: &DialogView<'_>) -> GameResult<()>;

    /// Paints the session statistics.
    fn draw_statistics(&mut self, report: &StatsReport) -> GameResult<()>;
}
