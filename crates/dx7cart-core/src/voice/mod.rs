//! Voice codec.
//!
//! A voice is a fixed 128-byte block: six 17-byte operators, the pitch
//! envelope, global parameters, a six-byte ASCII name and one reserved byte.
//! `layout` is the source of truth for offsets and legal maxima, `reader`
//! holds safe byte access and name conventions, `parser` and `writer` map
//! blocks to and from [`VoiceRecord`].
//!
//! Decoding keeps stored values verbatim so `encode(decode(b)) == b` for any
//! block with a printable, space-padded name. Range checks are explicit via
//! [`VoiceRecord::validate`].

mod display;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod record;
pub mod writer;

pub use error::VoiceError;
pub use parser::decode_voice;
pub use record::{Envelope, Operator, VoiceRecord, fit_name};
pub use writer::encode_voice;
