//! ANSI escape-sequence decoding.

use std::io::Read;

use tracing::{debug, instrument, warn};

use super::raw_mode::restore_quietly;
use super::{InputDecoder, InputEvent, RawInput, TerminalMode};
use crate::error::{GameError, GameErrorKind, GameResult};

/// Bytes read per poll.
pub const POLL_BUFFER_LEN: usize = 10;

const ESC: u8 = 27;

/// Multi-byte sequences, compared against the whole poll.
const SEQUENCES: &[(&[u8], InputEvent)] = &[
    (b"\x1b[A", InputEvent::MoveUp),
    (b"\x1b[B", InputEvent::MoveDown),
    (b"\x1b[C", InputEvent::MoveRight),
    (b"\x1b[D", InputEvent::MoveLeft),
    (b"\x1bOP", InputEvent::FunctionKey(1)),
    (b"\x1bOQ", InputEvent::FunctionKey(2)),
    (b"\x1bOR", InputEvent::FunctionKey(3)),
    (b"\x1bOS", InputEvent::FunctionKey(4)),
    (b"\x1b[15~", InputEvent::FunctionKey(5)),
    (b"\x1b[17~", InputEvent::FunctionKey(6)),
    (b"\x1b[18~", InputEvent::FunctionKey(7)),
    (b"\x1b[19~", InputEvent::FunctionKey(8)),
    (b"\x1b[20~", InputEvent::FunctionKey(9)),
    (b"\x1b[21~", InputEvent::FunctionKey(10)),
    (b"\x1b[23~", InputEvent::FunctionKey(11)),
    (b"\x1b[24~", InputEvent::FunctionKey(12)),
    (b"\x1b[31~", InputEvent::Home),
    (b"\x1b[35~", InputEvent::End),
    (b"\x1b[37~", InputEvent::PageUp),
    (b"\x1b[38~", InputEvent::PageDown),
    (b"\x1b[47~", InputEvent::Insert),
    (b"\x1b[48~", InputEvent::Delete),
    // xterm application cursor mode and VT220 editing keys
    (b"\x1bOA", InputEvent::MoveUp),
    (b"\x1bOB", InputEvent::MoveDown),
    (b"\x1bOC", InputEvent::MoveRight),
    (b"\x1bOD", InputEvent::MoveLeft),
    (b"\x1b[H", InputEvent::Home),
    (b"\x1b[F", InputEvent::End),
    (b"\x1b[2~", InputEvent::Insert),
    (b"\x1b[3~", InputEvent::Delete),
    (b"\x1b[5~", InputEvent::PageUp),
    (b"\x1b[6~", InputEvent::PageDown),
];

/// Decodes the bytes of one poll.
///
/// `buffer` may carry trailing zero bytes; they terminate the input. The
/// whole remaining input must match one entry exactly.
pub fn decode_escape_buffer(buffer: &[u8]) -> InputEvent {
    let end = buffer
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    let input = &buffer[..end];

    if let Some((_, event)) = SEQUENCES.iter().find(|(sequence, _)| *sequence == input) {
        return event.clone();
    }

    match input {
        [ESC] => InputEvent::Cancel,
        [b'\n'] | [b'\r'] => InputEvent::Confirm,
        [127] => InputEvent::Backspace,
        [b'\t'] => InputEvent::Tab,
        [byte @ 32..=126] => InputEvent::Character(char::from(*byte)),
        _ => InputEvent::Unknown(RawInput::Bytes(input.to_vec())),
    }
}

/// Decoder for terminals that report keys as ANSI escape sequences.
///
/// Every poll performs one read of at most [`POLL_BUFFER_LEN`] bytes. A key
/// press arrives as a single burst in raw mode, so one read is one key.
pub struct EscapeSequenceDecoder<R> {
    reader: R,
    mode: Box<dyn TerminalMode>,
}

impl<R: Read> EscapeSequenceDecoder<R> {
    /// Creates a decoder reading from `reader` and switching `mode`.
    pub fn new(reader: R, mode: Box<dyn TerminalMode>) -> Self {
        Self { reader, mode }
    }
}

impl<R: Read> InputDecoder for EscapeSequenceDecoder<R> {
    #[instrument(skip(self))]
    fn begin(&mut self) -> GameResult<()> {
        self.mode.enable_raw_no_echo()
    }

    #[instrument(skip(self))]
    fn decode(&mut self) -> GameResult<InputEvent> {
        let mut buffer = [0u8; POLL_BUFFER_LEN];
        let read = self.reader.read(&mut buffer)?;
        if read == 0 {
            return Err(GameError::new(GameErrorKind::Input(
                "end of input".to_string(),
            )));
        }

        let polled = &buffer[..read];
        let event = match decode_escape_buffer(polled) {
            // Report every byte read, including zeros the table lookup ignores.
            InputEvent::Unknown(_) => InputEvent::Unknown(RawInput::Bytes(polled.to_vec())),
            event => event,
        };
        match &event {
            InputEvent::Unknown(raw) => warn!(?raw, "Unrecognised key sequence"),
            other => debug!(event = ?other, "Decoded key"),
        }
        Ok(event)
    }

    fn exit(&mut self) {
        restore_quietly(self.mode.as_mut());
    }
}
