//! Scripted input and recording output shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use n_in_a_row::{
    BoardView, DialogView, GameError, GameErrorKind, GameResult, InputDecoder, InputEvent,
    Renderer, StatsReport,
};

/// Counts of raw-mode transitions seen by a [`ScriptedDecoder`].
#[derive(Debug, Default)]
pub struct ModeLog {
    pub begins: usize,
    pub exits: usize,
}

/// Decoder replaying a fixed list of events.
pub struct ScriptedDecoder {
    events: VecDeque<InputEvent>,
    modes: Rc<RefCell<ModeLog>>,
}

impl ScriptedDecoder {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> (Self, Rc<RefCell<ModeLog>>) {
        let modes = Rc::new(RefCell::new(ModeLog::default()));
        let decoder = Self {
            events: events.into_iter().collect(),
            modes: Rc::clone(&modes),
        };
        (decoder, modes)
    }
}

impl InputDecoder for ScriptedDecoder {
    fn begin(&mut self) -> GameResult<()> {
        self.modes.borrow_mut().begins += 1;
        Ok(())
    }

    fn decode(&mut self) -> GameResult<InputEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| GameError::new(GameErrorKind::Input("script exhausted".into())))
    }

    fn exit(&mut self) {
        self.modes.borrow_mut().exits += 1;
    }
}

/// One call received by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Board(BoardView),
    Dialog {
        messages: Vec<String>,
        highlighted: usize,
    },
    Statistics(StatsReport),
}

/// Renderer storing every call for later inspection.
#[derive(Default)]
pub struct RecordingRenderer {
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl RecordingRenderer {
    pub fn new() -> (Self, Rc<RefCell<Vec<Frame>>>) {
        let renderer = Self::default();
        let frames = Rc::clone(&renderer.frames);
        (renderer, frames)
    }
}

impl Renderer for RecordingRenderer {
    fn draw_board(&mut self, view: &BoardView) -> GameResult<()> {
        self.frames.borrow_mut().push(Frame::Board(view.clone()));
        Ok(())
    }

    fn draw_dialog(&mut self, view: &DialogView<'_>) -> GameResult<()> {
        self.frames.borrow_mut().push(Frame::Dialog {
            messages: view.messages.to_vec(),
            highlighted: view.highlighted,
        });
        Ok(())
    }

    fn draw_statistics(&mut self, report: &StatsReport) -> GameResult<()> {
        self.frames
            .borrow_mut()
            .push(Frame::Statistics(report.clone()));
        Ok(())
    }
}

/// Board frames only, in order.
pub fn boards(frames: &[Frame]) -> Vec<&BoardView> {
    frames
        .iter()
        .filter_map(|frame| match frame {
            Frame::Board(view) => Some(view),
            _ => None,
        })
        .collect()
}
