//! Tests for the decoders reading from real byte and code sources.

use std::collections::VecDeque;
use std::io::Read;

use n_in_a_row::{
    CodeSource, EscapeSequenceDecoder, GameErrorKind, GameResult, InputDecoder, InputEvent,
    InputSession, NoopMode, RawInput, ScanCodeDecoder,
};

/// Reader handing out one key burst per read.
struct Bursts(VecDeque<Vec<u8>>);

impl Read for Bursts {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.0.pop_front() {
            Some(burst) => {
                buf[..burst.len()].copy_from_slice(&burst);
                Ok(burst.len())
            }
            None => Ok(0),
        }
    }
}

struct Codes(VecDeque<u32>);

impl CodeSource for Codes {
    fn read_code(&mut self) -> GameResult<u32> {
        Ok(self.0.pop_front().unwrap_or(0))
    }
}

#[test]
fn test_escape_decoder_reads_one_key_per_poll() {
    let bursts = Bursts(VecDeque::from(vec![
        vec![27, 91, 65],
        vec![27, 91, 66],
        vec![65],
        vec![13],
        vec![27],
        vec![27, 91, 90],
    ]));
    let mut decoder = EscapeSequenceDecoder::new(bursts, Box::new(NoopMode));
    let mut input = InputSession::open(&mut decoder).unwrap();

    assert_eq!(input.decode().unwrap(), InputEvent::MoveUp);
    assert_eq!(input.decode().unwrap(), InputEvent::MoveDown);
    assert_eq!(input.decode().unwrap(), InputEvent::Character('A'));
    assert_eq!(input.decode().unwrap(), InputEvent::Confirm);
    assert_eq!(input.decode().unwrap(), InputEvent::Cancel);
    assert_eq!(
        input.decode().unwrap(),
        InputEvent::Unknown(RawInput::Bytes(vec![27, 91, 90]))
    );

    let err = input.decode().unwrap_err();
    assert!(matches!(err.kind(), GameErrorKind::Input(_)));
    input.close();
}

#[test]
fn test_escape_decoder_keeps_zero_bytes_of_unknown_keys() {
    let bursts = Bursts(VecDeque::from(vec![vec![0], vec![0, 0], vec![13]]));
    let mut decoder = EscapeSequenceDecoder::new(bursts, Box::new(NoopMode));
    let mut input = InputSession::open(&mut decoder).unwrap();

    assert_eq!(
        input.decode().unwrap(),
        InputEvent::Unknown(RawInput::Bytes(vec![0]))
    );
    assert_eq!(
        input.decode().unwrap(),
        InputEvent::Unknown(RawInput::Bytes(vec![0, 0]))
    );
    assert_eq!(input.decode().unwrap(), InputEvent::Confirm);
    input.close();
}

#[test]
fn test_scan_code_decoder() {
    let codes = Codes(VecDeque::from(vec![0xE048, 0xE04B, 13, 27, u32::from('t')]));
    let mut decoder = ScanCodeDecoder::new(codes, Box::new(NoopMode));
    decoder.begin().unwrap();

    assert_eq!(decoder.decode().unwrap(), InputEvent::MoveUp);
    assert_eq!(decoder.decode().unwrap(), InputEvent::MoveLeft);
    assert_eq!(decoder.decode().unwrap(), InputEvent::Confirm);
    assert_eq!(decoder.decode().unwrap(), InputEvent::Cancel);
    assert_eq!(decoder.decode().unwrap(), InputEvent::Character('t'));
    assert_eq!(
        decoder.decode().unwrap(),
        InputEvent::Unknown(RawInput::Code(0))
    );
    decoder.exit();
}
