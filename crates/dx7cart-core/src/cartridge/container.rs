use serde::Serialize;

use super::error::CartridgeError;
use super::layout::{Framing, VOICE_COUNT};
use crate::voice::VoiceRecord;

/// A bank of exactly 32 voices in slot order.
///
/// The cartridge owns its voices; slot `i` is patch number `i + 1` on the
/// instrument. `framing` records how the bytes were read. Writing always
/// produces SysEx framing.
///
/// # Examples
/// ```
/// use dx7cart_core::{Cartridge, Framing, VoiceRecord};
///
/// let cartridge = Cartridge::new(std::array::from_fn(|_| VoiceRecord::init()));
/// assert_eq!(cartridge.voices().len(), 32);
/// assert_eq!(cartridge.framing(), Framing::SysEx);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cartridge {
    framing: Framing,
    voices: [VoiceRecord; VOICE_COUNT],
}

impl Cartridge {
    pub fn new(voices: [VoiceRecord; VOICE_COUNT]) -> Self {
        Self {
            framing: Framing::SysEx,
            voices,
        }
    }

    /// Build a cartridge from a vector that must hold exactly 32 voices.
    ///
    /// # Errors
    /// `CartridgeError::VoiceCount` for any other length.
    pub fn from_voices(voices: Vec<VoiceRecord>) -> Result<Self, CartridgeError> {
        let voices: [VoiceRecord; VOICE_COUNT] =
            voices
                .try_into()
                .map_err(|rejected: Vec<VoiceRecord>| CartridgeError::VoiceCount {
                    actual: rejected.len(),
                })?;
        Ok(Self::new(voices))
    }

    pub(crate) fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    /// Framing the cartridge was decoded from (SysEx for fresh cartridges).
    pub fn framing(&self) -> Framing {
        self.framing
    }

    pub fn voices(&self) -> &[VoiceRecord; VOICE_COUNT] {
        &self.voices
    }

    pub fn voice(&self, slot: usize) -> Option<&VoiceRecord> {
        self.voices.get(slot)
    }

    pub fn voice_mut(&mut self, slot: usize) -> Option<&mut VoiceRecord> {
        self.voices.get_mut(slot)
    }

    pub fn into_voices(self) -> [VoiceRecord; VOICE_COUNT] {
        self.voices
    }
}
