//! Game configuration loaded from TOML.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use tracing::{debug, info, instrument, warn};

use crate::input::DecoderKind;
use crate::players::{FirstFreeAi, HumanPlayer, Player};

/// Smallest supported board.
pub const MIN_BOARD_SIZE: usize = 3;
/// Largest supported board.
pub const MAX_BOARD_SIZE: usize = 10;
/// Fewest players in a game.
pub const MIN_PLAYERS: usize = 2;
/// Most players in a game.
pub const MAX_PLAYERS: usize = 8;

/// Symbols handed out to players added without one.
pub const SYMBOL_PALETTE: [char; 19] = [
    '◎', '●', '◇', '◆', '□', '■', '♧', '♣', '♤', '♠', '♡', '♥', '♢', '♦', '♪', '♫', '$', '·', '∞',
];

/// Title of the game for a board dimension.
pub fn game_title(size: usize) -> String {
    if size == 3 {
        "Tic-Tac-Toe".to_string()
    } else {
        format!("{size}-In-a-Row")
    }
}

/// Who controls a seat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerKind {
    /// Keyboard player.
    #[default]
    Human,
    /// Computer player.
    Ai,
}

/// One seat of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct PlayerSpec {
    /// Display name.
    #[new(into)]
    name: String,
    /// Mark drawn on the board.
    symbol: char,
    /// Who controls the seat.
    #[serde(default)]
    kind: PlayerKind,
}

impl PlayerSpec {
    /// Builds the player for this seat.
    pub fn build(&self) -> Box<dyn Player> {
        match self.kind {
            PlayerKind::Human => Box::new(HumanPlayer::new(self.name.clone(), self.symbol)),
            PlayerKind::Ai => Box::new(FirstFreeAi::new(self.name.clone(), self.symbol)),
        }
    }
}

/// Settings for one run of the game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board dimension N; N in a row wins.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Roster in seat order.
    #[serde(default = "default_players")]
    players: Vec<PlayerSpec>,

    /// Keyboard decoding strategy.
    #[serde(default)]
    decoder: DecoderKind,

    /// Where the binary writes its log.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_board_size() -> usize {
    MIN_BOARD_SIZE
}

fn default_players() -> Vec<PlayerSpec> {
    vec![
        PlayerSpec::new("Player 1", '✕', PlayerKind::Human),
        PlayerSpec::new("Computer", '○', PlayerKind::Ai),
    ]
}

fn default_log_file() -> PathBuf {
    PathBuf::from("n_in_a_row.log")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            players: default_players(),
            decoder: DecoderKind::default(),
            log_file: default_log_file(),
        }
    }
}

impl GameConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(
            board_size = config.board_size,
            players = config.players.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks board size, roster size and symbol uniqueness.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "Board size {} outside {}..={}",
                self.board_size, MIN_BOARD_SIZE, MAX_BOARD_SIZE
            )));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players.len()) {
            return Err(ConfigError::new(format!(
                "{} players configured, expected {}..={}",
                self.players.len(),
                MIN_PLAYERS,
                MAX_PLAYERS
            )));
        }

        let mut seen = HashSet::new();
        for seat in &self.players {
            if seat.name.trim().is_empty() {
                return Err(ConfigError::new("Player name must not be empty".to_string()));
            }
            if !seen.insert(seat.symbol) {
                return Err(ConfigError::new(format!(
                    "Symbol '{}' used by more than one player",
                    seat.symbol
                )));
            }
        }
        Ok(())
    }

    /// Replaces the board dimension.
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Replaces the decoding strategy.
    pub fn with_decoder(mut self, decoder: DecoderKind) -> Self {
        self.decoder = decoder;
        self
    }

    /// Replaces the log file path.
    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = log_file.into();
        self
    }

    /// Truncates or pads the roster to `count` seats.
    ///
    /// New seats are human players named "Player k", each taking the first
    /// palette symbol nobody uses yet.
    #[instrument(skip(self))]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.players.truncate(count);
        while self.players.len() < count {
            let seat = self.players.len() + 1;
            let Some(symbol) = self.free_symbol() else {
                warn!(seat, "Symbol palette exhausted");
                break;
            };
            self.players
                .push(PlayerSpec::new(format!("Player {seat}"), symbol, PlayerKind::Human));
        }
        self
    }

    /// Adds or removes the computer player.
    ///
    /// Enabling turns the last seat into "Computer" when no seat is an AI.
    /// Disabling turns every AI seat into a human "Player k".
    #[instrument(skip(self))]
    pub fn with_ai(mut self, enabled: bool) -> Self {
        if enabled {
            let has_ai = self.players.iter().any(|seat| seat.kind == PlayerKind::Ai);
            if let (false, Some(last)) = (has_ai, self.players.last_mut()) {
                last.name = "Computer".to_string();
                last.kind = PlayerKind::Ai;
            }
        } else {
            for (index, seat) in self.players.iter_mut().enumerate() {
                if seat.kind == PlayerKind::Ai {
                    seat.name = format!("Player {}", index + 1);
                    seat.kind = PlayerKind::Human;
                }
            }
        }
        self
    }

    fn free_symbol(&self) -> Option<char> {
        SYMBOL_PALETTE
            .iter()
            .copied()
            .find(|symbol| self.players.iter().all(|seat| seat.symbol != *symbol))
    }

    /// Title shown above the board.
    pub fn title(&self) -> String {
        game_title(self.board_size)
    }

    /// Builds the players in seat order.
    pub fn build_players(&self) -> Vec<Box<dyn Player>> {
        self.players.iter().map(PlayerSpec::build).collect()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
