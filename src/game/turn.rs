//! Per-turn input, movement and placement.

use strum::Display;
use tracing::{debug, info, instrument, warn};

use super::{Board, Slot};
use crate::error::{GameError, GameErrorKind, GameResult};
use crate::input::{InputDecoder, InputEvent, InputSession};
use crate::players::{MoveContext, Player, PlayerId, PlayerInfo, roster_info};
use crate::tui::{BoardView, Button, CellView, DialogChoice, MessageDialog, Renderer};

const RESUME: usize = 0;
const QUIT: usize = 1;

/// Where the controller is within the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TurnPhase {
    /// Waiting for a key from a human player.
    AwaitingInput,
    /// An AI player is choosing its move.
    Moving,
    /// A mark was placed; the round outcome is pending.
    Evaluating,
    /// The pause dialog is open.
    Paused,
    /// The round is over or was abandoned.
    Done,
}

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A mark was placed.
    Continue,
    /// The player chose Quit in the pause dialog.
    Quit,
}

/// The pause dialog: Resume or Quit, Escape resumes.
pub fn pause_dialog() -> MessageDialog {
    MessageDialog::new(
        vec![
            "Game is paused.".to_string(),
            "What do you want to do?".to_string(),
        ],
        vec![Button::new("Resume", 'R'), Button::new("Quit", 'Q')],
    )
    .with_default(RESUME)
    .with_cancel(RESUME)
}

fn wrap_step(value: usize, forward: bool, size: usize) -> usize {
    if forward {
        (value + 1) % size
    } else {
        (value + size - 1) % size
    }
}

/// Runs turns on one board for a fixed roster.
///
/// Owns the board, the players and the cursor. Only this type mutates the
/// board.
#[derive(Debug)]
pub struct TurnController {
    board: Board,
    players: Vec<Box<dyn Player>>,
    title: String,
    turn: usize,
    cursor_x: usize,
    cursor_y: usize,
    phase: TurnPhase,
    placed: usize,
}

impl TurnController {
    /// Creates a controller with an empty `size` × `size` board.
    #[instrument(skip(players, title), fields(players = players.len()))]
    pub fn new(
        size: usize,
        players: Vec<Box<dyn Player>>,
        title: impl Into<String>,
    ) -> GameResult<Self> {
        if size == 0 {
            return Err(GameError::new(GameErrorKind::InvalidSize(size)));
        }
        if players.is_empty() {
            return Err(GameError::new(GameErrorKind::NoPlayers));
        }
        Ok(Self {
            board: Board::new(size),
            players,
            title: title.into(),
            turn: 0,
            cursor_x: 0,
            cursor_y: 0,
            phase: TurnPhase::AwaitingInput,
            placed: 0,
        })
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in seat order.
    pub fn players(&self) -> &[Box<dyn Player>] {
        &self.players
    }

    /// Info snapshots of the roster.
    pub fn roster(&self) -> Vec<PlayerInfo> {
        roster_info(&self.players)
    }

    /// Seat of the player to move.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Id of the player to move.
    pub fn current_player(&self) -> PlayerId {
        PlayerId::new(self.turn)
    }

    /// Cursor position as `(row, column)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Marks placed since the last reset.
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Game title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Starts a new round: empty board, cursor home, first seat to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.turn = 0;
        self.placed = 0;
        self.phase = TurnPhase::AwaitingInput;
        info!("Round reset");
    }

    /// Passes the turn to the next seat.
    pub fn advance_turn(&mut self) {
        self.turn = (self.turn + 1) % self.players.len();
        self.phase = TurnPhase::AwaitingInput;
        debug!(turn = self.turn, "Turn advanced");
    }

    /// Marks the round as finished.
    pub fn finish(&mut self) {
        self.phase = TurnPhase::Done;
    }

    /// Moves the cursor one row up, wrapping to the bottom.
    pub fn cursor_up(&mut self) {
        self.cursor_x = wrap_step(self.cursor_x, false, self.board.size());
    }

    /// Moves the cursor one row down, wrapping to the top.
    pub fn cursor_down(&mut self) {
        self.cursor_x = wrap_step(self.cursor_x, true, self.board.size());
    }

    /// Moves the cursor one column left, wrapping to the right edge.
    pub fn cursor_left(&mut self) {
        self.cursor_y = wrap_step(self.cursor_y, false, self.board.size());
    }

    /// Moves the cursor one column right, wrapping to the left edge.
    pub fn cursor_right(&mut self) {
        self.cursor_y = wrap_step(self.cursor_y, true, self.board.size());
    }

    /// Semantic snapshot for the renderer.
    pub fn board_view(&self, show_cursor: bool) -> BoardView {
        let size = self.board.size();
        let players = self.roster();
        let cells = (0..size * size)
            .map(|index| {
                let (x, y) = (index / size, index % size);
                let symbol = self
                    .board
                    .owner_at(x, y)
                    .and_then(|owner| players.get(owner.index()))
                    .map(|info| *info.symbol());
                CellView {
                    symbol,
                    cursor: show_cursor && (x, y) == (self.cursor_x, self.cursor_y),
                }
            })
            .collect();

        BoardView {
            title: self.title.clone(),
            size,
            cells,
            players,
            turn: self.turn,
        }
    }

    /// Plays one turn for the current player.
    ///
    /// Suspends the calling thread while waiting for keys or for an AI move.
    /// Returns [`TurnOutcome::Continue`] once a mark is placed.
    #[instrument(skip(self, decoder, renderer), fields(turn = self.turn))]
    pub fn one_turn(
        &mut self,
        decoder: &mut dyn InputDecoder,
        renderer: &mut dyn Renderer,
    ) -> GameResult<TurnOutcome> {
        renderer.draw_board(&self.board_view(false))?;

        if self.players[self.turn].is_human() {
            self.phase = TurnPhase::AwaitingInput;
            let mut input = InputSession::open(decoder)?;
            let outcome = self.human_turn(&mut *input, renderer)?;
            input.close();
            Ok(outcome)
        } else {
            self.ai_turn()?;
            Ok(TurnOutcome::Continue)
        }
    }

    fn ai_turn(&mut self) -> GameResult<()> {
        self.phase = TurnPhase::Moving;
        let me = self.current_player();
        let roster = self.roster();
        let context = MoveContext::new(me, self.placed);
        let choice = self.players[self.turn].get_move(&self.board, &roster, &context)?;

        self.place(choice.x, choice.y)?;
        info!(player = %me, x = choice.x, y = choice.y, "AI placed mark");
        Ok(())
    }

    fn human_turn(
        &mut self,
        decoder: &mut dyn InputDecoder,
        renderer: &mut dyn Renderer,
    ) -> GameResult<TurnOutcome> {
        let mut first_touch = true;
        let mut redraw = false;

        loop {
            if redraw {
                renderer.draw_board(&self.board_view(true))?;
                redraw = false;
            }

            let event = decoder.decode()?;
            if first_touch {
                first_touch = false;
                if !matches!(event, InputEvent::Cancel) {
                    redraw = true;
                    continue;
                }
            }

            match event {
                InputEvent::MoveUp => {
                    self.cursor_up();
                    redraw = true;
                }
                InputEvent::MoveDown => {
                    self.cursor_down();
                    redraw = true;
                }
                InputEvent::MoveLeft => {
                    self.cursor_left();
                    redraw = true;
                }
                InputEvent::MoveRight => {
                    self.cursor_right();
                    redraw = true;
                }
                InputEvent::Cancel => {
                    self.phase = TurnPhase::Paused;
                    info!("Game paused");
                    match pause_dialog().show(decoder, renderer)? {
                        DialogChoice::Button(QUIT) => {
                            self.phase = TurnPhase::Done;
                            info!("Player quit from pause dialog");
                            return Ok(TurnOutcome::Quit);
                        }
                        DialogChoice::Button(_) | DialogChoice::Dismissed => {
                            self.phase = TurnPhase::AwaitingInput;
                            redraw = true;
                        }
                    }
                }
                InputEvent::Confirm => {
                    let (x, y) = self.cursor();
                    if self.board.can_put(x, y) {
                        self.place(x, y)?;
                        info!(player = %self.current_player(), x, y, "Human placed mark");
                        return Ok(TurnOutcome::Continue);
                    }
                    debug!(x, y, "Cursor slot occupied, ignoring confirm");
                }
                InputEvent::Unknown(raw) => warn!(?raw, "Ignoring unknown input"),
                InputEvent::FunctionKey(_)
                | InputEvent::Home
                | InputEvent::End
                | InputEvent::PageUp
                | InputEvent::PageDown
                | InputEvent::Insert
                | InputEvent::Delete
                | InputEvent::Backspace
                | InputEvent::Tab
                | InputEvent::Character(_) => {}
            }
        }
    }

    fn place(&mut self, x: usize, y: usize) -> GameResult<()> {
        self.board.put(x, y, Slot::new(self.current_player()))?;
        self.placed += 1;
        self.phase = TurnPhase::Evaluating;
        Ok(())
    }
}
