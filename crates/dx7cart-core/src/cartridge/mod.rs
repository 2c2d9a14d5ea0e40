//! Cartridge container: 32 voices plus SysEx framing.
//!
//! `layout` fixes the framing constants and the [`Framing`] variants,
//! `reader` performs whole-buffer checks (length, header, terminator,
//! checksum), `parser` splits the voice-data region into 128-byte slots and
//! `writer` reassembles a framed dump. Decoding is atomic: a [`Cartridge`]
//! exists only when every check has passed.
//!
//! Version française (résumé):
//! Une cartouche contient 32 voix de 128 octets, encadrées par un en-tête
//! SysEx, une somme de contrôle sur 7 bits et l'octet F7. Le cadrage est
//! toujours déclaré par l'appelant; l'écriture produit toujours la forme SysEx.

mod container;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
mod writer;

pub use container::Cartridge;
pub use error::CartridgeError;
pub use layout::{Framing, VOICE_COUNT};
pub use parser::decode_cartridge;
