//! Human player driven by the keyboard cursor.

use super::{MoveContext, Player, PlayerInfo};
use crate::error::{GameError, GameErrorKind, GameResult};
use crate::game::{Board, Move};
use tracing::error;

/// Human player using keyboard input.
///
/// Moves are not requested from this type: the turn controller derives them
/// from the cursor position when the player confirms.
#[derive(Debug, Clone, derive_new::new)]
pub struct HumanPlayer {
    #[new(into)]
    name: String,
    symbol: char,
}

impl Player for HumanPlayer {
    fn is_human(&self) -> bool {
        true
    }

    fn symbol(&self) -> char {
        self.symbol
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(
        &self,
        _board: &Board,
        _players: &[PlayerInfo],
        _context: &MoveContext,
    ) -> GameResult<Move> {
        error!(player = %self.name, "Move requested from a human player");
        Err(GameError::new(GameErrorKind::HumanMoveRequested(
            self.name.clone(),
        )))
    }
}
