use std::ops::Range;

use super::error::CartridgeError;
use super::layout::{Framing, SYSEX_END};
use crate::checksum;
use crate::voice::layout::MAX_DATA_BYTE;

/// Framing checks over a whole cartridge buffer.
pub struct FrameReader<'a> {
    payload: &'a [u8],
    framing: Framing,
}

impl<'a> FrameReader<'a> {
    pub fn new(payload: &'a [u8], framing: Framing) -> Self {
        Self { payload, framing }
    }

    pub fn require_total_len(&self) -> Result<(), CartridgeError> {
        let expected = self.framing.total_len();
        if self.payload.len() != expected {
            return Err(CartridgeError::LengthMismatch {
                framing: self.framing,
                expected,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, CartridgeError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(CartridgeError::LengthMismatch {
                framing: self.framing,
                expected: self.framing.total_len(),
                actual: self.payload.len(),
            })
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], CartridgeError> {
        self.payload
            .get(range)
            .ok_or(CartridgeError::LengthMismatch {
                framing: self.framing,
                expected: self.framing.total_len(),
                actual: self.payload.len(),
            })
    }

    /// Compare the header byte by byte, reporting the first difference.
    pub fn check_header(&self) -> Result<(), CartridgeError> {
        let expected = self.framing.header();
        let actual = self.read_slice(0..expected.len())?;
        match expected
            .iter()
            .zip(actual)
            .position(|(expected, actual)| expected != actual)
        {
            Some(offset) => Err(CartridgeError::HeaderMismatch {
                offset,
                expected: expected[offset],
                actual: actual[offset],
            }),
            None => Ok(()),
        }
    }

    pub fn check_end(&self) -> Result<(), CartridgeError> {
        let Some(offset) = self.framing.end_offset() else {
            return Ok(());
        };
        let actual = self.read_u8(offset)?;
        if actual != SYSEX_END {
            return Err(CartridgeError::TerminatorMismatch { offset, actual });
        }
        Ok(())
    }

    /// SysEx payloads carry 7-bit data; a set high bit means a corrupt dump.
    pub fn check_data_bytes(&self) -> Result<(), CartridgeError> {
        if self.framing != Framing::SysEx {
            return Ok(());
        }
        let range = self.framing.voice_data_range();
        let start = range.start;
        let data = self.read_slice(range)?;
        match data.iter().position(|value| *value > MAX_DATA_BYTE) {
            Some(index) => Err(CartridgeError::DataByte {
                offset: start + index,
                value: data[index],
            }),
            None => Ok(()),
        }
    }

    pub fn check_checksum(&self) -> Result<(), CartridgeError> {
        let Some(offset) = self.framing.checksum_offset() else {
            return Ok(());
        };
        let declared = self.read_u8(offset)?;
        let window = self.voice_data()?;
        if !checksum::validate(window, declared) {
            return Err(CartridgeError::ChecksumMismatch {
                declared,
                computed: checksum::compute(window),
            });
        }
        Ok(())
    }

    pub fn voice_data(&self) -> Result<&'a [u8], CartridgeError> {
        self.read_slice(self.framing.voice_data_range())
    }
}

#[cfg(test)]
mod tests {
    use super::FrameReader;
    use crate::cartridge::error::CartridgeError;
    use crate::cartridge::layout::{Framing, SYSEX_HEADER};

    #[test]
    fn check_header_reports_first_difference() {
        let mut payload = vec![0u8; Framing::SysEx.total_len()];
        payload[..6].copy_from_slice(&SYSEX_HEADER);
        payload[3] = 0x00;
        let reader = FrameReader::new(&payload, Framing::SysEx);
        let err = reader.check_header().unwrap_err();
        assert_eq!(
            err,
            CartridgeError::HeaderMismatch {
                offset: 3,
                expected: 0x09,
                actual: 0x00
            }
        );
    }

    #[test]
    fn bare_framing_skips_envelope_checks() {
        let payload = vec![0x55u8; Framing::Bare.total_len()];
        let reader = FrameReader::new(&payload, Framing::Bare);
        assert!(reader.check_header().is_ok());
        assert!(reader.check_end().is_ok());
        assert!(reader.check_checksum().is_ok());
        assert_eq!(reader.voice_data().unwrap().len(), 4096);
    }

    #[test]
    fn check_data_bytes_flags_high_bit_in_sysex_only() {
        let mut payload = vec![0u8; Framing::SysEx.total_len()];
        payload[6 + 119] = 0xF7;
        let reader = FrameReader::new(&payload, Framing::SysEx);
        assert_eq!(
            reader.check_data_bytes().unwrap_err(),
            CartridgeError::DataByte {
                offset: 125,
                value: 0xF7
            }
        );

        let bare = vec![0x80u8; Framing::Bare.total_len()];
        assert!(FrameReader::new(&bare, Framing::Bare).check_data_bytes().is_ok());
    }

    #[test]
    fn check_end_requires_eox() {
        let mut payload = vec![0u8; Framing::SysEx.total_len()];
        payload[4103] = 0x7F;
        let reader = FrameReader::new(&payload, Framing::SysEx);
        let err = reader.check_end().unwrap_err();
        assert_eq!(
            err,
            CartridgeError::TerminatorMismatch {
                offset: 4103,
                actual: 0x7F
            }
        );
    }
}
