//! Modal message dialog with shortcut buttons.

use derive_getters::Getters;
use tracing::{debug, info, instrument};

use super::{DialogView, Renderer};
use crate::error::GameResult;
use crate::input::{InputDecoder, InputEvent};

/// A dialog button bound to a one-character shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct Button {
    /// Text shown on the button.
    #[new(into)]
    label: String,
    /// Key selecting the button directly (matched case-insensitively).
    shortcut: char,
}

impl Button {
    fn matches(&self, c: char) -> bool {
        self.shortcut.eq_ignore_ascii_case(&c)
    }
}

/// Result of a modal dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    /// The button at this index was chosen.
    Button(usize),
    /// Escape was pressed on a dialog without a cancel button.
    Dismissed,
}

/// Modal dialog: message lines and a row of buttons.
#[derive(Debug, Clone, Getters)]
pub struct MessageDialog {
    messages: Vec<String>,
    buttons: Vec<Button>,
    default_index: usize,
    cancel_index: Option<usize>,
}

impl MessageDialog {
    /// Creates a dialog highlighting the first button, without a cancel button.
    pub fn new(messages: Vec<String>, buttons: Vec<Button>) -> Self {
        Self {
            messages,
            buttons,
            default_index: 0,
            cancel_index: None,
        }
    }

    /// Button highlighted when the dialog opens.
    pub fn with_default(mut self, index: usize) -> Self {
        self.default_index = index;
        self
    }

    /// Button chosen when Escape is pressed.
    pub fn with_cancel(mut self, index: usize) -> Self {
        self.cancel_index = Some(index);
        self
    }

    /// Shows the dialog and blocks until a choice is made.
    ///
    /// Reads from `decoder` without touching the terminal mode; the caller
    /// holds an [`InputSession`](crate::input::InputSession).
    #[instrument(skip(self, decoder, renderer), fields(messages = ?self.messages))]
    pub fn show(
        &self,
        decoder: &mut dyn InputDecoder,
        renderer: &mut dyn Renderer,
    ) -> GameResult<DialogChoice> {
        let count = self.buttons.len();
        let mut highlighted = self.default_index.min(count.saturating_sub(1));

        loop {
            renderer.draw_dialog(&DialogView {
                messages: &self.messages,
                buttons: &self.buttons,
                highlighted,
            })?;

            let event = decoder.decode()?;
            debug!(?event, highlighted, "Dialog input");
            let choice = match event {
                InputEvent::Character(c) => self
                    .buttons
                    .iter()
                    .position(|button| button.matches(c))
                    .map(DialogChoice::Button),
                InputEvent::Confirm if count > 0 => Some(DialogChoice::Button(highlighted)),
                InputEvent::Cancel => {
                    Some(self.cancel_index.map_or(DialogChoice::Dismissed, DialogChoice::Button))
                }
                InputEvent::MoveLeft | InputEvent::MoveUp if count > 0 => {
                    highlighted = (highlighted + count - 1) % count;
                    None
                }
                InputEvent::MoveRight | InputEvent::MoveDown | InputEvent::Tab if count > 0 => {
                    highlighted = (highlighted + 1) % count;
                    None
                }
                _ => None,
            };

            if let Some(choice) = choice {
                info!(?choice, "Dialog closed");
                return Ok(choice);
            }
        }
    }
}
