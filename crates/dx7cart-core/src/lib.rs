//! dx7cart core library: codec for 32-voice SysEx cartridges.
//!
//! The crate converts between the bulk-dump byte format of a six-operator FM
//! synthesizer and structured voice records. Voice blocks are decoded and
//! encoded by `voice` (layout/reader/parser/writer), the `cartridge` module
//! validates framing and splits or reassembles the 32 slots, `checksum` holds
//! the 7-bit integrity check and `transport` isolates all file I/O. `diff`
//! and `generate` are diagnostics and tooling built on the public API.
//!
//! Invariants:
//! - Decoding is atomic: a `Cartridge` only exists when length, header,
//!   terminator, checksum and every voice are valid.
//! - `encode(decode(b)) == b` for every voice block whose name is printable
//!   ASCII padded with spaces.
//! - Writing always emits SysEx framing with a recomputed checksum.
//! - The framing of an input is declared by the caller, never inferred.
//!
//! Version française (résumé):
//! Cette crate décode et encode les cartouches de 32 voix (128 octets chacune)
//! transmises par SysEx. Le cadrage est déclaré explicitement, la somme de
//! contrôle est recalculée à chaque écriture et les E/S restent dans
//! `transport`.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use dx7cart_core::{DecodeOptions, Framing, read_cartridge, write_cartridge};
//!
//! let mut cartridge = read_cartridge(Path::new("rom1a.syx"), Framing::SysEx, &DecodeOptions::strict())?;
//! if let Some(voice) = cartridge.voice_mut(0) {
//!     voice.name = "BRASS2".to_string();
//! }
//! write_cartridge(Path::new("edited.syx"), &cartridge)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cartridge;
pub mod checksum;
pub mod diff;
pub mod generate;
mod options;
pub mod transport;
pub mod voice;

pub use cartridge::{Cartridge, CartridgeError, Framing, VOICE_COUNT, decode_cartridge};
pub use options::{DecodeOptions, NameLeniency};
pub use transport::{TransportError, read_bytes, read_cartridge, write_cartridge};
pub use voice::{
    Envelope, Operator, VoiceError, VoiceRecord, decode_voice, encode_voice, fit_name,
};

/// Tool name embedded in JSON dumps.
pub const TOOL_NAME: &str = "dx7cart";
