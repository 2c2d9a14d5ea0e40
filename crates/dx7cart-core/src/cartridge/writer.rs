use log::debug;

use super::container::Cartridge;
use super::error::CartridgeError;
use super::layout::{SYSEX_END, SYSEX_HEADER, SYSEX_TOTAL_LEN, VOICE_DATA_LEN};
use crate::checksum;
use crate::voice::encode_voice;

impl Cartridge {
    /// Serialize as a SysEx bulk dump with a freshly computed checksum.
    ///
    /// # Examples
    /// ```
    /// use dx7cart_core::{Cartridge, VoiceRecord};
    ///
    /// let cartridge = Cartridge::from_voices(vec![VoiceRecord::init(); 32])?;
    /// let bytes = cartridge.to_bytes()?;
    /// assert_eq!(bytes.len(), 4104);
    /// assert_eq!(&bytes[..6], &[0xF0, 0x43, 0x00, 0x09, 0x20, 0x00]);
    /// assert_eq!(bytes[4103], 0xF7);
    /// # Ok::<(), dx7cart_core::CartridgeError>(())
    /// ```
    ///
    /// # Errors
    /// `CartridgeError::Voice` when a voice name cannot be encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CartridgeError> {
        let voice_data = self.to_voice_data()?;
        let mut data = Vec::with_capacity(SYSEX_TOTAL_LEN);
        data.extend_from_slice(&SYSEX_HEADER);
        data.extend_from_slice(&voice_data);
        data.push(checksum::compute(&voice_data));
        data.push(SYSEX_END);
        debug!("encoded cartridge, checksum {}", data[data.len() - 2]);
        Ok(data)
    }

    /// Serialize only the 4096-byte voice-data region.
    ///
    /// # Errors
    /// `CartridgeError::Voice` when a voice name cannot be encoded.
    pub fn to_voice_data(&self) -> Result<Vec<u8>, CartridgeError> {
        let mut data = Vec::with_capacity(VOICE_DATA_LEN);
        for (slot, voice) in self.voices().iter().enumerate() {
            let block = encode_voice(voice).map_err(|source| CartridgeError::Voice { slot, source })?;
            data.extend_from_slice(&block);
        }
        Ok(data)
    }
}
