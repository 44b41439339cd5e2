//! Board, rules, turns and the round loop.

mod board;
pub mod rules;
mod session;
mod turn;

pub use board::{Board, Move, Slot};
pub use session::{
    GameSession, OutcomeMessage, RoundResult, SessionEnd, restart_dialog,
};
pub use turn::{TurnController, TurnOutcome, TurnPhase, pause_dialog};
