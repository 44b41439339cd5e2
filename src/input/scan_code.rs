//! Console key-code decoding.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use tracing::{debug, instrument, warn};

use super::raw_mode::restore_quietly;
use super::{InputDecoder, InputEvent, RawInput, TerminalMode};
use crate::error::GameResult;

/// Console codes for extended keys are `EXTENDED | scan code`.
const EXTENDED: u32 = 0xE000;

const UP: u32 = EXTENDED | 0x48;
const DOWN: u32 = EXTENDED | 0x50;
const RIGHT: u32 = EXTENDED | 0x4D;
const LEFT: u32 = EXTENDED | 0x4B;
const HOME: u32 = EXTENDED | 0x47;
const END: u32 = EXTENDED | 0x4F;
const PAGE_UP: u32 = EXTENDED | 0x49;
const PAGE_DOWN: u32 = EXTENDED | 0x51;
const INSERT: u32 = EXTENDED | 0x52;
const DELETE: u32 = EXTENDED | 0x53;
const F1: u32 = EXTENDED | 0x3B;
const F10: u32 = EXTENDED | 0x44;
const F11: u32 = EXTENDED | 0x85;
const F12: u32 = EXTENDED | 0x86;

const ESCAPE: u32 = 27;
const ENTER: u32 = 13;
const BACKSPACE: u32 = 8;
const TAB: u32 = 9;

/// Decodes a single console key code.
pub fn decode_scan_code(code: u32) -> InputEvent {
    match code {
        UP => InputEvent::MoveUp,
        DOWN => InputEvent::MoveDown,
        RIGHT => InputEvent::MoveRight,
        LEFT => InputEvent::MoveLeft,
        F1..=F10 => InputEvent::FunctionKey((code - F1 + 1) as u8),
        F11 => InputEvent::FunctionKey(11),
        F12 => InputEvent::FunctionKey(12),
        HOME => InputEvent::Home,
        END => InputEvent::End,
        PAGE_UP => InputEvent::PageUp,
        PAGE_DOWN => InputEvent::PageDown,
        INSERT => InputEvent::Insert,
        DELETE => InputEvent::Delete,
        ESCAPE => InputEvent::Cancel,
        ENTER => InputEvent::Confirm,
        BACKSPACE => InputEvent::Backspace,
        TAB => InputEvent::Tab,
        32..=126 => char::from_u32(code).map_or(
            InputEvent::Unknown(RawInput::Code(code)),
            InputEvent::Character,
        ),
        _ => InputEvent::Unknown(RawInput::Code(code)),
    }
}

/// Source of console key codes.
pub trait CodeSource {
    /// Blocks until the next key code is available.
    fn read_code(&mut self) -> GameResult<u32>;
}

/// Reads key presses through crossterm and reports them as console codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleCodeSource;

impl ConsoleCodeSource {
    /// Encodes a key event in the console code space; 0 when it has no code.
    pub fn encode(key: &KeyEvent) -> u32 {
        match key.code {
            KeyCode::Up => UP,
            KeyCode::Down => DOWN,
            KeyCode::Right => RIGHT,
            KeyCode::Left => LEFT,
            KeyCode::Home => HOME,
            KeyCode::End => END,
            KeyCode::PageUp => PAGE_UP,
            KeyCode::PageDown => PAGE_DOWN,
            KeyCode::Insert => INSERT,
            KeyCode::Delete => DELETE,
            KeyCode::F(n @ 1..=10) => F1 + u32::from(n) - 1,
            KeyCode::F(11) => F11,
            KeyCode::F(12) => F12,
            KeyCode::Esc => ESCAPE,
            KeyCode::Enter => ENTER,
            KeyCode::Backspace => BACKSPACE,
            KeyCode::Tab => TAB,
            KeyCode::Char(c) => u32::from(c),
            _ => 0,
        }
    }
}

impl CodeSource for ConsoleCodeSource {
    fn read_code(&mut self) -> GameResult<u32> {
        loop {
            if let Event::Key(key) = event::read()? {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                return Ok(Self::encode(&key));
            }
        }
    }
}

/// Decoder for consoles that report one numeric code per key.
pub struct ScanCodeDecoder<S> {
    source: S,
    mode: Box<dyn TerminalMode>,
}

impl<S: CodeSource> ScanCodeDecoder<S> {
    /// Creates a decoder reading codes from `source`.
    pub fn new(source: S, mode: Box<dyn TerminalMode>) -> Self {
        Self { source, mode }
    }
}

impl<S: CodeSource> InputDecoder for ScanCodeDecoder<S> {
    #[instrument(skip(self))]
    fn begin(&mut self) -> GameResult<()> {
        self.mode.enable_raw_no_echo()
    }

    #[instrument(skip(self))]
    fn decode(&mut self) -> GameResult<InputEvent> {
        let code = self.source.read_code()?;
        let event = decode_scan_code(code);
        match &event {
            InputEvent::Unknown(raw) => warn!(?raw, "Unrecognised key code"),
            other => debug!(code, event = ?other, "Decoded key"),
        }
        Ok(event)
    }

    fn exit(&mut self) {
        restore_quietly(self.mode.as_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_known_codes() {
        assert_eq!(decode_scan_code(57416), InputEvent::MoveUp);
        assert_eq!(decode_scan_code(57424), InputEvent::MoveDown);
        assert_eq!(decode_scan_code(57421), InputEvent::MoveRight);
        assert_eq!(decode_scan_code(57419), InputEvent::MoveLeft);
        assert_eq!(decode_scan_code(57403), InputEvent::FunctionKey(1));
        assert_eq!(decode_scan_code(57412), InputEvent::FunctionKey(10));
        assert_eq!(decode_scan_code(57477), InputEvent::FunctionKey(11));
        assert_eq!(decode_scan_code(57478), InputEvent::FunctionKey(12));
        assert_eq!(decode_scan_code(57415), InputEvent::Home);
        assert_eq!(decode_scan_code(57423), InputEvent::End);
        assert_eq!(decode_scan_code(57417), InputEvent::PageUp);
        assert_eq!(decode_scan_code(57425), InputEvent::PageDown);
        assert_eq!(decode_scan_code(57426), InputEvent::Insert);
        assert_eq!(decode_scan_code(57427), InputEvent::Delete);
        assert_eq!(decode_scan_code(27), InputEvent::Cancel);
        assert_eq!(decode_scan_code(13), InputEvent::Confirm);
        assert_eq!(decode_scan_code(8), InputEvent::Backspace);
        assert_eq!(decode_scan_code(9), InputEvent::Tab);
    }

    #[test]
    fn test_printable_range() {
        assert_eq!(decode_scan_code(32), InputEvent::Character(' '));
        assert_eq!(decode_scan_code(u32::from('q')), InputEvent::Character('q'));
        assert_eq!(decode_scan_code(126), InputEvent::Character('~'));
        assert_eq!(decode_scan_code(31), InputEvent::Unknown(RawInput::Code(31)));
        assert_eq!(decode_scan_code(127), InputEvent::Unknown(RawInput::Code(127)));
        assert_eq!(decode_scan_code(57500), InputEvent::Unknown(RawInput::Code(57500)));
    }

    #[test]
    fn test_encode_agrees_with_decode() {
        let cases = [
            (KeyCode::Up, InputEvent::MoveUp),
            (KeyCode::Left, InputEvent::MoveLeft),
            (KeyCode::F(7), InputEvent::FunctionKey(7)),
            (KeyCode::F(12), InputEvent::FunctionKey(12)),
            (KeyCode::Enter, InputEvent::Confirm),
            (KeyCode::Esc, InputEvent::Cancel),
            (KeyCode::Char('r'), InputEvent::Character('r')),
        ];
        for (code, expected) in cases {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(decode_scan_code(ConsoleCodeSource::encode(&key)), expected);
        }
    }
}
