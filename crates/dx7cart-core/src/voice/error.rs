use thiserror::Error;

/// Errors returned by voice decoding, encoding and validation.
///
/// # Examples
/// ```
/// use dx7cart_core::VoiceError;
///
/// let err = VoiceError::LengthMismatch { expected: 128, actual: 12 };
/// assert!(err.to_string().contains("expected 128 bytes"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceError {
    #[error("voice length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("non-ASCII byte 0x{value:02X} in voice name at offset {offset}")]
    NonAsciiName { offset: usize, value: u8 },
    #[error("voice name too long: {actual} bytes, at most {max} fit")]
    NameTooLong { max: usize, actual: usize },
    #[error("{field} out of range at offset {offset}: {value} > {max}")]
    OutOfRange {
        field: &'static str,
        offset: usize,
        value: u8,
        max: u8,
    },
}
