use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::voice::layout::VOICE_SIZE;

pub const VOICE_COUNT: usize = 32;
pub const VOICE_DATA_LEN: usize = VOICE_COUNT * VOICE_SIZE;

/// Status, Yamaha ID, channel 1, format 9 (32 voices), byte count 0x2000.
pub const SYSEX_HEADER: [u8; 6] = [0xF0, 0x43, 0x00, 0x09, 0x20, 0x00];
pub const SYSEX_END: u8 = 0xF7;

pub const SYSEX_VOICE_DATA_RANGE: Range<usize> =
    SYSEX_HEADER.len()..SYSEX_HEADER.len() + VOICE_DATA_LEN;
pub const SYSEX_CHECKSUM_OFFSET: usize = SYSEX_VOICE_DATA_RANGE.end;
pub const SYSEX_END_OFFSET: usize = SYSEX_CHECKSUM_OFFSET + 1;
pub const SYSEX_TOTAL_LEN: usize = SYSEX_END_OFFSET + 1;

pub const BARE_TOTAL_LEN: usize = VOICE_DATA_LEN;

/// Byte framing of a cartridge buffer.
///
/// Callers always name the framing they expect; it is never guessed from the
/// buffer length. The 8-byte header variant `F0 43 00 09 20 00 00 00`
/// (4106-byte files) is not accepted.
///
/// # Examples
/// ```
/// use dx7cart_core::Framing;
///
/// assert_eq!(Framing::SysEx.total_len(), 4104);
/// assert_eq!(Framing::Bare.total_len(), 4096);
/// assert_eq!(Framing::SysEx.voice_data_range(), 6..4102);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framing {
    /// Header, 4096 voice bytes, checksum, terminator (4104 bytes).
    #[default]
    SysEx,
    /// 4096 voice bytes, nothing else.
    Bare,
}

impl Framing {
    pub fn header(self) -> &'static [u8] {
        match self {
            Framing::SysEx => &SYSEX_HEADER,
            Framing::Bare => &[],
        }
    }

    pub fn total_len(self) -> usize {
        match self {
            Framing::SysEx => SYSEX_TOTAL_LEN,
            Framing::Bare => BARE_TOTAL_LEN,
        }
    }

    /// Voice-data region, which is also the checksum window.
    pub fn voice_data_range(self) -> Range<usize> {
        match self {
            Framing::SysEx => SYSEX_VOICE_DATA_RANGE,
            Framing::Bare => 0..VOICE_DATA_LEN,
        }
    }

    pub fn checksum_offset(self) -> Option<usize> {
        match self {
            Framing::SysEx => Some(SYSEX_CHECKSUM_OFFSET),
            Framing::Bare => None,
        }
    }

    pub fn end_offset(self) -> Option<usize> {
        match self {
            Framing::SysEx => Some(SYSEX_END_OFFSET),
            Framing::Bare => None,
        }
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framing::SysEx => write!(f, "sysex"),
            Framing::Bare => write!(f, "bare"),
        }
    }
}
