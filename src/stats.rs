//! Per-session game statistics.

use derive_getters::Getters;
use tracing::{debug, instrument, warn};

use crate::players::{PlayerId, PlayerInfo};

/// Receives the result of every finished round.
pub trait Statistics {
    /// Records one finished round; `winner` is `None` for a draw.
    fn record_round(&mut self, players: &[PlayerInfo], winner: Option<PlayerId>);

    /// Summary for display.
    fn report(&self) -> StatsReport;
}

/// Score line of one player.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PlayerScore {
    /// Display name.
    name: String,
    /// Mark on the board.
    symbol: char,
    /// Rounds won.
    wins: u32,
}

/// Statistics summary shown when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct StatsReport {
    /// Finished rounds.
    rounds: u32,
    /// Rounds ending with a full board and no line.
    draws: u32,
    /// One entry per player, in seat order.
    scores: Vec<PlayerScore>,
}

/// In-memory statistics for one process run.
///
/// Players keep their seats across restarts, so scores are indexed by seat.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    report: StatsReport,
}

impl SessionStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    fn sync_roster(&mut self, players: &[PlayerInfo]) {
        let scores = &mut self.report.scores;
        for info in players.iter().skip(scores.len()) {
            scores.push(PlayerScore {
                name: info.name().clone(),
                symbol: *info.symbol(),
                wins: 0,
            });
        }
    }
}

impl Statistics for SessionStats {
    #[instrument(skip(self, players))]
    fn record_round(&mut self, players: &[PlayerInfo], winner: Option<PlayerId>) {
        self.sync_roster(players);
        self.report.rounds += 1;
        match winner {
            Some(id) => match self.report.scores.get_mut(id.index()) {
                Some(score) => score.wins += 1,
                None => {
                    warn!(winner = %id, seats = players.len(), "Winner has no seat, win not counted")
                }
            },
            None => self.report.draws += 1,
        }
        debug!(
            rounds = self.report.rounds,
            draws = self.report.draws,
            "Round recorded"
        );
    }

    fn report(&self) -> StatsReport {
        self.report.clone()
    }
}
