use thiserror::Error;

use super::layout::Framing;
use crate::voice::VoiceError;

/// Errors returned by cartridge framing, decoding and encoding.
///
/// # Examples
/// ```
/// use dx7cart_core::{CartridgeError, Framing};
///
/// let err = CartridgeError::LengthMismatch {
///     framing: Framing::SysEx,
///     expected: 4104,
///     actual: 4096,
/// };
/// assert!(err.to_string().contains("expected 4104 bytes, got 4096"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartridgeError {
    #[error("{framing} cartridge length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        framing: Framing,
        expected: usize,
        actual: usize,
    },
    #[error("header mismatch at offset {offset}: expected 0x{expected:02X}, got 0x{actual:02X}")]
    HeaderMismatch { offset: usize, expected: u8, actual: u8 },
    #[error("missing end of exclusive at offset {offset}: got 0x{actual:02X}")]
    TerminatorMismatch { offset: usize, actual: u8 },
    #[error("byte 0x{value:02X} at offset {offset} is not a 7-bit data byte")]
    DataByte { offset: usize, value: u8 },
    #[error("checksum mismatch: declared {declared}, computed {computed}")]
    ChecksumMismatch { declared: u8, computed: u8 },
    #[error("a cartridge holds exactly 32 voices, got {actual}")]
    VoiceCount { actual: usize },
    #[error("voice {slot}: {source}")]
    Voice {
        slot: usize,
        #[source]
        source: VoiceError,
    },
}
