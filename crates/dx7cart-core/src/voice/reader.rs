use std::ops::Range;

use log::warn;

use super::error::VoiceError;
use super::layout;
use super::record::is_printable_ascii;
use crate::options::NameLeniency;

const NAME_REPLACEMENT: char = '?';

pub struct VoiceReader<'a> {
    payload: &'a [u8],
}

impl<'a> VoiceReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_exact_len(&self, expected: usize) -> Result<(), VoiceError> {
        if self.payload.len() != expected {
            return Err(VoiceError::LengthMismatch {
                expected,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, VoiceError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(VoiceError::LengthMismatch {
                expected: layout::VOICE_SIZE,
                actual: self.payload.len(),
            })
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], VoiceError> {
        self.payload.get(range).ok_or(VoiceError::LengthMismatch {
            expected: layout::VOICE_SIZE,
            actual: self.payload.len(),
        })
    }

    pub fn read_quad(&self, range: Range<usize>) -> Result<[u8; 4], VoiceError> {
        let bytes = self.read_slice(range)?;
        <[u8; 4]>::try_from(bytes).map_err(|_| VoiceError::LengthMismatch {
            expected: 4,
            actual: bytes.len(),
        })
    }

    /// Read a space/NUL padded ASCII name, trimming trailing padding only.
    pub fn read_name(
        &self,
        range: Range<usize>,
        leniency: NameLeniency,
    ) -> Result<String, VoiceError> {
        let start = range.start;
        let bytes = self.read_slice(range)?;
        let end = bytes
            .iter()
            .rposition(|b| *b != layout::NAME_PAD && *b != 0)
            .map_or(0, |last| last + 1);

        let mut name = String::with_capacity(end);
        for (index, value) in bytes[..end].iter().copied().enumerate() {
            if is_printable_ascii(value) {
                name.push(char::from(value));
                continue;
            }
            match leniency {
                NameLeniency::Strict => {
                    return Err(VoiceError::NonAsciiName {
                        offset: start + index,
                        value,
                    });
                }
                NameLeniency::Lenient => {
                    warn!(
                        "replacing byte 0x{value:02X} at offset {} in voice name",
                        start + index
                    );
                    name.push(NAME_REPLACEMENT);
                }
            }
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::VoiceReader;
    use crate::options::NameLeniency;
    use crate::voice::error::VoiceError;

    #[test]
    fn read_name_trims_spaces_and_nul_padding() {
        let payload = *b"EP 1\0 ";
        let reader = VoiceReader::new(&payload);
        let name = reader.read_name(0..6, NameLeniency::Strict).unwrap();
        assert_eq!(name, "EP 1");
    }

    #[test]
    fn read_name_keeps_leading_spaces() {
        let payload = *b"  BASS";
        let reader = VoiceReader::new(&payload);
        let name = reader.read_name(0..6, NameLeniency::Strict).unwrap();
        assert_eq!(name, "  BASS");
    }

    #[test]
    fn read_name_strict_rejects_high_bytes() {
        let payload = [b'A', 0xC3, b'B', b' ', b' ', b' '];
        let reader = VoiceReader::new(&payload);
        let err = reader.read_name(0..6, NameLeniency::Strict).unwrap_err();
        assert_eq!(err, VoiceError::NonAsciiName { offset: 1, value: 0xC3 });
    }

    #[test]
    fn read_name_lenient_replaces_high_bytes() {
        let payload = [b'A', 0xC3, b'B', 0x7F, b' ', b' '];
        let reader = VoiceReader::new(&payload);
        let name = reader.read_name(0..6, NameLeniency::Lenient).unwrap();
        assert_eq!(name, "A?B?");
    }

    #[test]
    fn require_exact_len_rejects_longer_payload() {
        let payload = [0u8; 129];
        let reader = VoiceReader::new(&payload);
        let err = reader.require_exact_len(128).unwrap_err();
        assert_eq!(
            err,
            VoiceError::LengthMismatch {
                expected: 128,
                actual: 129
            }
        );
    }
}
