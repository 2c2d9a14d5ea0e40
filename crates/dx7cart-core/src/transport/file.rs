use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::{debug, info};

use super::error::TransportError;
use crate::cartridge::{Cartridge, Framing, decode_cartridge};
use crate::options::DecodeOptions;

/// Read a whole file into memory.
///
/// # Errors
/// `TransportError::Io` when the file cannot be opened or read.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, TransportError> {
    let data = fs::read(path).map_err(|source| io_error(path, source))?;
    debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Read and decode a cartridge file with the declared framing.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
///
/// use dx7cart_core::{DecodeOptions, Framing, read_cartridge};
///
/// let cartridge = read_cartridge(Path::new("rom1a.syx"), Framing::SysEx, &DecodeOptions::strict())?;
/// println!("{}", cartridge.voices()[0].name);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// `TransportError::Io` for file-system failures, `TransportError::Cartridge`
/// when the bytes are not a valid cartridge.
pub fn read_cartridge(
    path: &Path,
    framing: Framing,
    options: &DecodeOptions,
) -> Result<Cartridge, TransportError> {
    let data = read_bytes(path)?;
    Ok(decode_cartridge(&data, framing, options)?)
}

/// Encode a cartridge and write it as a SysEx bulk dump.
///
/// The cartridge is fully encoded before the file is created, so an encoding
/// failure never leaves a partial file behind.
///
/// # Errors
/// `TransportError::Cartridge` when a voice cannot be encoded,
/// `TransportError::Io` when the file cannot be written.
pub fn write_cartridge(path: &Path, cartridge: &Cartridge) -> Result<(), TransportError> {
    let data = cartridge.to_bytes()?;
    let mut file = File::create(path).map_err(|source| io_error(path, source))?;
    file.write_all(&data)
        .and_then(|()| file.flush())
        .map_err(|source| io_error(path, source))?;
    info!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> TransportError {
    TransportError::Io {
        path: path.to_path_buf(),
        source,
    }
}
