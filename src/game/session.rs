//! Round loop, outcome messages and the restart dialog.

use tracing::{info, instrument};

use super::rules::check_winner;
use super::turn::{TurnController, TurnOutcome};
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::input::{InputDecoder, InputSession};
use crate::players::{Player, PlayerId, PlayerInfo};
use crate::stats::{Statistics, StatsReport};
use crate::tui::{Button, DialogChoice, MessageDialog, Renderer};

const TRY_AGAIN: usize = 0;
const BACK_TO_MENU: usize = 1;

/// How a single round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    /// The player completed a line.
    Won(PlayerId),
    /// The board filled up without a line.
    Draw,
    /// A player quit from the pause dialog.
    Quit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player left through the restart dialog.
    Finished,
    /// The player quit mid-round.
    Quit,
}

/// Text shown in the restart dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeMessage {
    /// Nobody completed a line.
    Draw,
    /// An AI player won.
    LostToAi,
    /// The only human beat the AI.
    BeatAi,
    /// One of several humans won a game that includes an AI.
    HumanBeatsHumansWithAi,
    /// A human won a game without AI players.
    HumanBeatsHumans,
}

impl OutcomeMessage {
    /// Picks the message for a finished round.
    ///
    /// `winner_is_human` is `None` for a draw.
    pub fn select(winner_is_human: Option<bool>, has_ai: bool, human_count: usize) -> Self {
        match winner_is_human {
            None => Self::Draw,
            Some(false) if has_ai => Self::LostToAi,
            Some(_) if has_ai && human_count == 1 => Self::BeatAi,
            Some(_) if has_ai => Self::HumanBeatsHumansWithAi,
            Some(_) => Self::HumanBeatsHumans,
        }
    }

    /// Picks the message from the roster and the winner.
    pub fn for_round(players: &[PlayerInfo], winner: Option<&PlayerInfo>) -> Self {
        let has_ai = players.iter().any(|info| !info.is_human());
        let human_count = players.iter().filter(|info| *info.is_human()).count();
        Self::select(winner.map(|info| *info.is_human()), has_ai, human_count)
    }

    /// Dialog lines; `winner_name` fills in the winner where the text names one.
    pub fn lines(&self, winner_name: &str) -> Vec<String> {
        match self {
            Self::Draw => vec![
                "You draw the game".into(),
                "Please restart the game.".into(),
            ],
            Self::LostToAi => vec![
                "You lose!".into(),
                "[Computer] beats you.".into(),
                "Would you like to have another try?".into(),
            ],
            Self::BeatAi => vec![
                "You win!".into(),
                "Congratulations! You beat the Computer!".into(),
                "Now do you want to play again?".into(),
            ],
            Self::HumanBeatsHumansWithAi => vec![
                format!("{winner_name} win!"),
                "Congratulations! You beat the Computer!".into(),
                "Now do you want to play again?".into(),
            ],
            Self::HumanBeatsHumans => vec![
                format!("{winner_name} win!"),
                "Congratulations! You beat your friends.".into(),
                "Now do you want to play again?".into(),
            ],
        }
    }
}

/// The restart dialog: another try or back to the menu, Escape leaves.
pub fn restart_dialog(messages: Vec<String>) -> MessageDialog {
    MessageDialog::new(
        messages,
        vec![
            Button::new("Have another try", 'T'),
            Button::new("Back to menu", 'B'),
        ],
    )
    .with_default(TRY_AGAIN)
    .with_cancel(BACK_TO_MENU)
}

/// One interactive session: rounds until the player leaves.
pub struct GameSession {
    controller: TurnController,
    decoder: Box<dyn InputDecoder>,
    renderer: Box<dyn Renderer>,
    stats: Box<dyn Statistics>,
}

impl GameSession {
    /// Builds a session for `config`.
    #[instrument(skip_all, fields(size = *config.board_size(), players = config.players().len()))]
    pub fn new(
        config: &GameConfig,
        decoder: Box<dyn InputDecoder>,
        renderer: Box<dyn Renderer>,
        stats: Box<dyn Statistics>,
    ) -> GameResult<Self> {
        let controller = TurnController::new(
            *config.board_size(),
            config.build_players(),
            config.title(),
        )?;
        Ok(Self::with_controller(controller, decoder, renderer, stats))
    }

    /// Builds a session around an existing controller.
    pub fn with_controller(
        controller: TurnController,
        decoder: Box<dyn InputDecoder>,
        renderer: Box<dyn Renderer>,
        stats: Box<dyn Statistics>,
    ) -> Self {
        Self {
            controller,
            decoder,
            renderer,
            stats,
        }
    }

    /// Builds a session for an explicit roster.
    pub fn with_players(
        size: usize,
        title: impl Into<String>,
        players: Vec<Box<dyn Player>>,
        decoder: Box<dyn InputDecoder>,
        renderer: Box<dyn Renderer>,
        stats: Box<dyn Statistics>,
    ) -> GameResult<Self> {
        let controller = TurnController::new(size, players, title)?;
        Ok(Self::with_controller(controller, decoder, renderer, stats))
    }

    /// The turn controller.
    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    /// Statistics collected so far.
    pub fn report(&self) -> StatsReport {
        self.stats.report()
    }

    /// Plays one round from an empty board.
    #[instrument(skip(self))]
    pub fn play_round(&mut self) -> GameResult<RoundResult> {
        self.controller.reset();
        self.renderer.draw_board(&self.controller.board_view(false))?;

        loop {
            let outcome = self
                .controller
                .one_turn(self.decoder.as_mut(), self.renderer.as_mut())?;
            if outcome == TurnOutcome::Quit {
                return Ok(RoundResult::Quit);
            }

            let board = self.controller.board();
            if let Some(winner) = check_winner(board) {
                self.controller.finish();
                info!(%winner, "Round won");
                return Ok(RoundResult::Won(winner));
            }
            if board.is_full() {
                self.controller.finish();
                info!("Round drawn");
                return Ok(RoundResult::Draw);
            }
            self.controller.advance_turn();
        }
    }

    /// Plays rounds until the player quits or leaves the restart dialog.
    ///
    /// Suspends the calling thread for the whole session.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> GameResult<SessionEnd> {
        info!(title = self.controller.title(), "Session started");

        loop {
            let winner = match self.play_round()? {
                RoundResult::Quit => {
                    self.renderer.draw_statistics(&self.stats.report())?;
                    info!("Session quit mid-round");
                    return Ok(SessionEnd::Quit);
                }
                RoundResult::Won(id) => Some(id),
                RoundResult::Draw => None,
            };

            self.renderer.draw_board(&self.controller.board_view(false))?;
            let roster = self.controller.roster();
            self.stats.record_round(&roster, winner);

            let winner_info = winner.and_then(|id| roster.get(id.index()));
            let message = OutcomeMessage::for_round(&roster, winner_info);
            let winner_name = winner_info.map(|info| info.name().as_str()).unwrap_or("");
            let dialog = restart_dialog(message.lines(winner_name));

            let choice = {
                let mut input = InputSession::open(self.decoder.as_mut())?;
                dialog.show(&mut *input, self.renderer.as_mut())?
            };
            info!(?message, ?choice, "Round finished");

            if choice != DialogChoice::Button(TRY_AGAIN) {
                self.renderer.draw_statistics(&self.stats.report())?;
                return Ok(SessionEnd::Finished);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_covers_every_branch() {
        assert_eq!(OutcomeMessage::select(None, true, 1), OutcomeMessage::Draw);
        assert_eq!(OutcomeMessage::select(None, false, 2), OutcomeMessage::Draw);
        assert_eq!(
            OutcomeMessage::select(Some(false), true, 1),
            OutcomeMessage::LostToAi
        );
        assert_eq!(
            OutcomeMessage::select(Some(true), true, 1),
            OutcomeMessage::BeatAi
        );
        assert_eq!(
            OutcomeMessage::select(Some(true), true, 2),
            OutcomeMessage::HumanBeatsHumansWithAi
        );
        assert_eq!(
            OutcomeMessage::select(Some(true), false, 3),
            OutcomeMessage::HumanBeatsHumans
        );
    }

    #[test]
    fn test_lines_name_the_winner() {
        let lines = OutcomeMessage::HumanBeatsHumans.lines("Alice");
        assert_eq!(lines[0], "Alice win!");
        assert_eq!(lines[1], "Congratulations! You beat your friends.");

        let lines = OutcomeMessage::LostToAi.lines("Computer");
        assert_eq!(lines[0], "You lose!");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_restart_dialog_escape_leaves() {
        let dialog = restart_dialog(vec!["You win!".into()]);
        assert_eq!(*dialog.default_index(), TRY_AGAIN);
        assert_eq!(*dialog.cancel_index(), Some(BACK_TO_MENU));
        assert_eq!(*dialog.buttons()[BACK_TO_MENU].shortcut(), 'B');
    }
}
