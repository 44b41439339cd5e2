//! N-in-a-row - terminal game binary.

#![warn(missing_docs)]

use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use n_in_a_row::{
    Cli, GameConfig, GameSession, SessionEnd, SessionStats, StatsReport, TerminalRenderer,
    build_decoder,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    init_tracing(&config)?;
    info!(title = %config.title(), "Starting n_in_a_row");

    let result = run_game(&config);
    if let Err(e) = &result {
        error!(error = %e, "Game aborted");
    }
    let (end, report) = result?;

    info!(?end, "Game finished");
    print_summary(&report);
    Ok(())
}

/// Logs to a file so the game screen is not disturbed.
fn init_tracing(config: &GameConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Holds the alternate screen and restores the terminal when dropped.
struct ScreenGuard;

impl ScreenGuard {
    fn enter() -> Result<Self> {
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
            warn!(error = %e, "Failed to leave alternate screen");
        }
    }
}

/// Runs the session on the alternate screen and always restores the terminal.
#[instrument(skip(config))]
fn run_game(config: &GameConfig) -> Result<(SessionEnd, StatsReport)> {
    let screen = ScreenGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    let mut session = GameSession::new(
        config,
        build_decoder(*config.decoder()),
        Box::new(TerminalRenderer::new(terminal)),
        Box::new(SessionStats::new()),
    )?;
    let end = session.run()?;
    let report = session.report();

    drop(screen);
    Ok((end, report))
}

/// Prints the final scores after the game screen is gone.
fn print_summary(report: &StatsReport) {
    println!(
        "Rounds played: {}  Draws: {}",
        report.rounds(),
        report.draws()
    );
    for score in report.scores() {
        println!("  {} {:<16} {} wins", score.symbol(), score.name(), score.wins());
    }
}
