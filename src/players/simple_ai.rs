//! Simple AI player (first available slot).

use super::{MoveContext, Player, PlayerInfo};
use crate::error::{GameError, GameErrorKind, GameResult};
use crate::game::{Board, Move};
use tracing::{debug, instrument};

/// Simple AI that picks the first empty slot in row-major order.
#[derive(Debug, Clone, derive_new::new)]
pub struct FirstFreeAi {
    #[new(into)]
    name: String,
    symbol: char,
}

impl Player for FirstFreeAi {
    fn is_human(&self) -> bool {
        false
    }

    fn symbol(&self) -> char {
        self.symbol
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, board, _players), fields(ai = %self.name))]
    fn get_move(
        &self,
        board: &Board,
        _players: &[PlayerInfo],
        context: &MoveContext,
    ) -> GameResult<Move> {
        debug!("AI making move");

        let Some(choice) = board.empty_cells().next() else {
            // A full board ends the round before anyone is asked to move.
            return Err(GameError::new(GameErrorKind::NoFreeSlot));
        };

        debug!(x = choice.x, y = choice.y, "AI chose slot");
        Ok(choice)
    }
}
