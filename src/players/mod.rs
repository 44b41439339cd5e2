//! Player trait and implementations.

mod human;
mod simple_ai;

pub use human::HumanPlayer;
pub use simple_ai::FirstFreeAi;

use derive_getters::Getters;
use derive_more::{Display, From};

use crate::error::GameResult;
use crate::game::{Board, Move};

/// Seat of a player in the turn order.
///
/// Slots hold this instead of the player itself, so marks on the board are
/// back-references into the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("#{_0}")]
pub struct PlayerId(usize);

impl PlayerId {
    /// Creates an id for the given seat index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the seat index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Snapshot of a player's public attributes.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PlayerInfo {
    /// Seat in the turn order.
    id: PlayerId,
    /// Display name.
    name: String,
    /// Mark drawn on the board.
    symbol: char,
    /// Whether moves come from the keyboard.
    is_human: bool,
}

impl PlayerInfo {
    /// Captures the attributes of `player` sitting at `id`.
    pub fn of(id: PlayerId, player: &dyn Player) -> Self {
        Self {
            id,
            name: player.name().to_string(),
            symbol: player.symbol(),
            is_human: player.is_human(),
        }
    }
}

/// Extra information handed to a player when it is asked for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_new::new)]
pub struct MoveContext {
    /// The seat that is moving.
    me: PlayerId,
    /// Marks already placed in the current round.
    placed: usize,
}

/// Trait for players that can take part in a game.
pub trait Player: std::fmt::Debug {
    /// Whether this player moves with the keyboard cursor.
    fn is_human(&self) -> bool;

    /// Mark drawn on the board for this player.
    fn symbol(&self) -> char;

    /// Display name.
    fn name(&self) -> &str;

    /// Chooses a move on `board`.
    ///
    /// Suspends the calling thread until the player has decided. The returned
    /// coordinates must name an empty slot; the engine does not retry.
    fn get_move(
        &self,
        board: &Board,
        players: &[PlayerInfo],
        context: &MoveContext,
    ) -> GameResult<Move>;
}

/// Builds the info snapshots for a roster.
pub fn roster_info(players: &[Box<dyn Player>]) -> Vec<PlayerInfo> {
    players
        .iter()
        .enumerate()
        .map(|(index, player)| PlayerInfo::of(PlayerId::new(index), player.as_ref()))
        .collect()
}
