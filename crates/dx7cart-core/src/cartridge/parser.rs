use log::debug;

use super::container::Cartridge;
use super::error::CartridgeError;
use super::layout::{Framing, VOICE_COUNT};
use super::reader::FrameReader;
use crate::options::DecodeOptions;
use crate::voice::decode_voice;
use crate::voice::layout::VOICE_SIZE;

/// Decode a cartridge buffer with an explicitly declared framing.
///
/// Checks run in order: total length, header, terminator, 7-bit data bytes,
/// checksum, then each voice. Nothing is returned unless every check passes.
///
/// # Examples
/// ```
/// use dx7cart_core::{DecodeOptions, Framing, decode_cartridge};
///
/// let bare = vec![0u8; 4096];
/// let cartridge = decode_cartridge(&bare, Framing::Bare, &DecodeOptions::strict())?;
/// assert_eq!(cartridge.framing(), Framing::Bare);
///
/// let err = decode_cartridge(&bare, Framing::SysEx, &DecodeOptions::strict()).unwrap_err();
/// assert!(err.to_string().contains("length mismatch"));
/// # Ok::<(), dx7cart_core::CartridgeError>(())
/// ```
///
/// # Errors
/// `LengthMismatch`, `HeaderMismatch`, `TerminatorMismatch`, `DataByte`,
/// `ChecksumMismatch`, or `Voice` wrapping the first failing slot.
pub fn decode_cartridge(
    data: &[u8],
    framing: Framing,
    options: &DecodeOptions,
) -> Result<Cartridge, CartridgeError> {
    let reader = FrameReader::new(data, framing);
    reader.require_total_len()?;
    reader.check_header()?;
    reader.check_end()?;
    reader.check_data_bytes()?;
    reader.check_checksum()?;

    let voice_data = reader.voice_data()?;
    let mut voices = Vec::with_capacity(VOICE_COUNT);
    for (slot, chunk) in voice_data.chunks_exact(VOICE_SIZE).enumerate() {
        let voice =
            decode_voice(chunk, options).map_err(|source| CartridgeError::Voice { slot, source })?;
        voices.push(voice);
    }
    debug!("decoded {} voices from {framing} buffer", voices.len());

    Ok(Cartridge::from_voices(voices)?.with_framing(framing))
}

impl Cartridge {
    /// Same as [`decode_cartridge`].
    ///
    /// # Errors
    /// See [`decode_cartridge`].
    pub fn from_bytes(
        data: &[u8],
        framing: Framing,
        options: &DecodeOptions,
    ) -> Result<Self, CartridgeError> {
        decode_cartridge(data, framing, options)
    }
}
