//! N-in-a-row - tic-tac-toe generalised to N×N boards
//!
//! A terminal game for any mix of keyboard players and simple computer
//! players. A line of N marks in a row, column or diagonal wins.
//!
//! # Architecture
//!
//! - **Input**: raw keyboard decoding (ANSI escape sequences or console codes)
//! - **Game**: board, win and draw rules, the turn controller and the round loop
//! - **Players**: the `Player` trait, keyboard players and a first-free-slot AI
//! - **TUI**: the `Renderer` trait, modal dialogs and a ratatui renderer
//!
//! # Example
//!
//! ```no_run
//! use n_in_a_row::{GameConfig, GameSession, SessionStats, TerminalRenderer, build_decoder};
//! use ratatui::{Terminal, backend::CrosstermBackend};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default();
//! let terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
//! let mut session = GameSession::new(
//!     &config,
//!     build_decoder(*config.decoder()),
//!     Box::new(TerminalRenderer::new(terminal)),
//!     Box::new(SessionStats::new()),
//! )?;
//! session.run()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod error;
mod game;
mod input;
mod players;
mod stats;
mod tui;

// Crate-level exports - Command line
pub use cli::Cli;

// Crate-level exports - Configuration
pub use config::{
    ConfigError, GameConfig, MAX_BOARD_SIZE, MAX_PLAYERS, MIN_BOARD_SIZE, MIN_PLAYERS,
    PlayerKind, PlayerSpec, SYMBOL_PALETTE, game_title,
};

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind, GameResult};

// Crate-level exports - Game core
pub use game::rules::{check_winner, is_draw};
pub use game::{
    Board, GameSession, Move, OutcomeMessage, RoundResult, SessionEnd, Slot, TurnController,
    TurnOutcome, TurnPhase, pause_dialog, restart_dialog,
};

// Crate-level exports - Input
pub use input::{
    CodeSource, ConsoleCodeSource, CrosstermMode, DecoderKind, EscapeSequenceDecoder,
    InputDecoder, InputEvent, InputSession, NoopMode, POLL_BUFFER_LEN, RawInput,
    ScanCodeDecoder, TerminalMode, build_decoder, decode_escape_buffer, decode_scan_code,
};

// Crate-level exports - Players
pub use players::{FirstFreeAi, HumanPlayer, MoveContext, Player, PlayerId, PlayerInfo, roster_info};

// Crate-level exports - Statistics
pub use stats::{PlayerScore, SessionStats, Statistics, StatsReport};

// Crate-level exports - Rendering
pub use tui::{
    BoardView, Button, CellView, DialogChoice, DialogView, MessageDialog, Renderer,
    TerminalRenderer,
};
