//! Terminal mode control and the scoped input session.

use std::ops::{Deref, DerefMut};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::{debug, warn};

use super::InputDecoder;
use crate::error::{GameError, GameErrorKind, GameResult};

/// Switches the terminal between raw and cooked mode.
pub trait TerminalMode {
    /// Disables line buffering and echo.
    fn enable_raw_no_echo(&mut self) -> GameResult<()>;

    /// Restores the default line-buffered, echoing mode.
    fn restore_default_mode(&mut self) -> GameResult<()>;
}

/// Terminal mode control through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn enable_raw_no_echo(&mut self) -> GameResult<()> {
        enable_raw_mode()
            .map_err(|e| GameError::new(GameErrorKind::ModeAcquisition(e.to_string())))
    }

    fn restore_default_mode(&mut self) -> GameResult<()> {
        disable_raw_mode().map_err(|e| GameError::new(GameErrorKind::Input(e.to_string())))
    }
}

/// Mode control that does nothing, for input that is not a terminal.
#[derive(Debug, Default)]
pub struct NoopMode;

impl TerminalMode for NoopMode {
    fn enable_raw_no_echo(&mut self) -> GameResult<()> {
        Ok(())
    }

    fn restore_default_mode(&mut self) -> GameResult<()> {
        Ok(())
    }
}

/// Holds the terminal in raw mode for as long as it lives.
///
/// Opening calls [`InputDecoder::begin`]; dropping calls
/// [`InputDecoder::exit`], so the mode is restored on every exit path,
/// including `?` propagation and early quits.
pub struct InputSession<'a> {
    decoder: &'a mut dyn InputDecoder,
}

impl<'a> InputSession<'a> {
    /// Acquires raw mode on `decoder`.
    pub fn open(decoder: &'a mut dyn InputDecoder) -> GameResult<Self> {
        decoder.begin()?;
        debug!("Input session opened");
        Ok(Self { decoder })
    }

    /// Restores the terminal mode now.
    pub fn close(self) {
        drop(self);
    }
}

impl<'a> Deref for InputSession<'a> {
    type Target = dyn InputDecoder + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.decoder
    }
}

impl<'a> DerefMut for InputSession<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.decoder
    }
}

impl Drop for InputSession<'_> {
    fn drop(&mut self) {
        self.decoder.exit();
        debug!("Input session closed");
    }
}

/// Restores the default mode, logging instead of failing.
pub(super) fn restore_quietly(mode: &mut dyn TerminalMode) {
    if let Err(e) = mode.restore_default_mode() {
        warn!(error = %e, "Failed to restore terminal mode");
    }
}
