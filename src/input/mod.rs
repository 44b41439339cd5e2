//! Raw keyboard decoding.
//!
//! Platform byte or code sequences are turned into [`InputEvent`]s by one of
//! two [`InputDecoder`] strategies, picked once at startup:
//!
//! - [`EscapeSequenceDecoder`]: ANSI CSI/SS3 sequences read from a raw,
//!   no-echo terminal (Unix-like systems).
//! - [`ScanCodeDecoder`]: single numeric console codes (Windows).

mod escape;
mod raw_mode;
mod scan_code;

pub use escape::{EscapeSequenceDecoder, POLL_BUFFER_LEN, decode_escape_buffer};
pub use raw_mode::{CrosstermMode, InputSession, NoopMode, TerminalMode};
pub use scan_code::{CodeSource, ConsoleCodeSource, ScanCodeDecoder, decode_scan_code};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{info, instrument};

use crate::error::GameResult;

/// Undecodable input, kept verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Bytes of one escape-sequence poll, trailing zero bytes removed.
    Bytes(Vec<u8>),
    /// A console code outside the known table.
    Code(u32),
}

/// One decoded unit of keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Arrow up.
    MoveUp,
    /// Arrow down.
    MoveDown,
    /// Arrow left.
    MoveLeft,
    /// Arrow right.
    MoveRight,
    /// Enter.
    Confirm,
    /// Escape.
    Cancel,
    /// F1 to F12.
    FunctionKey(u8),
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Insert.
    Insert,
    /// Delete.
    Delete,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// A printable ASCII character.
    Character(char),
    /// Anything the decoder does not recognise.
    Unknown(RawInput),
}

/// Strategy turning raw terminal input into [`InputEvent`]s.
pub trait InputDecoder {
    /// Switches the terminal into raw, no-echo mode.
    fn begin(&mut self) -> GameResult<()>;

    /// Reads one complete input unit.
    ///
    /// Suspends the calling thread until a key is available; there is no
    /// timeout.
    fn decode(&mut self) -> GameResult<InputEvent>;

    /// Restores the terminal mode that was active before [`begin`](Self::begin).
    ///
    /// Always attempts the restore, even if `begin` was never called.
    fn exit(&mut self);
}

/// Which decoding strategy to use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DecoderKind {
    /// Scan codes on Windows, escape sequences elsewhere.
    #[default]
    Auto,
    /// ANSI escape sequences from standard input.
    EscapeSequence,
    /// Console key codes.
    ScanCode,
}

impl DecoderKind {
    /// Resolves `Auto` for the platform this binary was built for.
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto if cfg!(windows) => Self::ScanCode,
            Self::Auto => Self::EscapeSequence,
            other => other,
        }
    }
}

/// Builds the decoder for `kind`, reading from the process terminal.
#[instrument]
pub fn build_decoder(kind: DecoderKind) -> Box<dyn InputDecoder> {
    let resolved = kind.resolve();
    info!(decoder = %resolved, "Selected input decoder");
    match resolved {
        DecoderKind::ScanCode => Box::new(ScanCodeDecoder::new(
            ConsoleCodeSource,
            Box::new(CrosstermMode::default()),
        )),
        DecoderKind::EscapeSequence | DecoderKind::Auto => Box::new(EscapeSequenceDecoder::new(
            std::io::stdin(),
            Box::new(CrosstermMode::default()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_resolve_never_returns_auto() {
        for kind in DecoderKind::iter() {
            assert_ne!(kind.resolve(), DecoderKind::Auto);
        }
    }

    #[test]
    fn test_parse_kind_names() {
        assert_eq!(
            DecoderKind::from_str("escape-sequence").unwrap(),
            DecoderKind::EscapeSequence
        );
        assert_eq!(DecoderKind::from_str("scan-code").unwrap(), DecoderKind::ScanCode);
        assert_eq!(DecoderKind::ScanCode.to_string(), "scan-code");
        assert!(DecoderKind::from_str("telepathy").is_err());
    }
}
