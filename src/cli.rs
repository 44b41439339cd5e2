//! Command-line interface for n_in_a_row.

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::config::{ConfigError, GameConfig};
use crate::input::DecoderKind;

/// N-in-a-row - tic-tac-toe on boards up to 10x10, against friends or the computer
#[derive(Parser, Debug)]
#[command(name = "n_in_a_row")]
#[command(about = "Terminal N-in-a-row for humans and a simple AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board dimension (3 to 10); N in a row wins
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Number of players (2 to 8)
    #[arg(short, long)]
    pub players: Option<usize>,

    /// Whether the last seat is the computer
    #[arg(long)]
    pub ai: Option<bool>,

    /// Keyboard decoding strategy
    #[arg(long)]
    pub decoder: Option<DecoderKind>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Loads the configuration file, if any, and applies command-line overrides.
    #[instrument(skip(self))]
    pub fn load_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => {
                debug!("No config file given, using defaults");
                GameConfig::default()
            }
        };

        if let Some(size) = self.size {
            config = config.with_board_size(size);
        }
        if let Some(count) = self.players {
            config = config.with_player_count(count);
        }
        if let Some(ai) = self.ai {
            config = config.with_ai(ai);
        }
        if let Some(decoder) = self.decoder {
            config = config.with_decoder(decoder);
        }
        if let Some(log_file) = &self.log_file {
            config = config.with_log_file(log_file.clone());
        }

        config.validate()?;
        info!(
            board_size = config.board_size(),
            players = config.players().len(),
            decoder = %config.decoder(),
            "Configuration ready"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerKind;

    #[test]
    fn test_overrides_apply_on_defaults() {
        let cli = Cli::parse_from([
            "n_in_a_row",
            "--size",
            "5",
            "--players",
            "3",
            "--ai",
            "false",
            "--decoder",
            "scan-code",
        ]);
        let config = cli.load_config().unwrap();
        assert_eq!(*config.board_size(), 5);
        assert_eq!(config.players().len(), 3);
        assert!(config.players().iter().all(|p| *p.kind() == PlayerKind::Human));
        assert_eq!(*config.decoder(), DecoderKind::ScanCode);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = Cli::parse_from(["n_in_a_row", "--size", "12"]);
        assert!(cli.load_config().is_err());
    }
}
