//! Error types for the game core.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong inside the game core.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// Board access outside `[0, size)`.
    #[display("Coordinates ({x}, {y}) out of range for a {size}x{size} board")]
    OutOfRange {
        /// Row.
        x: usize,
        /// Column.
        y: usize,
        /// Board dimension.
        size: usize,
    },
    /// Placement on a slot that already holds a mark.
    #[display("Slot ({x}, {y}) is already occupied")]
    SlotOccupied {
        /// Row.
        x: usize,
        /// Column.
        y: usize,
    },
    /// The terminal could not be switched into raw, no-echo mode.
    #[display("Failed to enter raw input mode: {_0}")]
    ModeAcquisition(String),
    /// Reading from the input device failed.
    #[display("Input error: {_0}")]
    Input(String),
    /// Painting to the terminal failed.
    #[display("Render error: {_0}")]
    Render(String),
    /// A move was requested from a player that moves through the cursor.
    #[display("Player {_0} is human and cannot be asked for a move")]
    HumanMoveRequested(String),
    /// A move was requested on a board without empty slots.
    #[display("No empty slot left on the board")]
    NoFreeSlot,
    /// A board needs at least one slot.
    #[display("Board size must be at least 1, got {_0}")]
    InvalidSize(usize),
    /// A game was set up without any players.
    #[display("A game needs at least one player")]
    NoPlayers,
}

/// Game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game error: {} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error kind.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }
}

impl From<GameErrorKind> for GameError {
    #[track_caller]
    fn from(kind: GameErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<std::io::Error> for GameError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(GameErrorKind::Input(err.to_string()))
    }
}

/// Result alias for core operations.
pub type GameResult<T> = Result<T, GameError>;
