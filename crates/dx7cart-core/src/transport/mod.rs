//! File transport.
//!
//! Whole-file reads and writes with scoped handles; all format work is
//! delegated to `cartridge`.

pub mod error;
mod file;

pub use error::TransportError;
pub use file::{read_bytes, read_cartridge, write_cartridge};
