use std::path::PathBuf;

use thiserror::Error;

use crate::cartridge::CartridgeError;

/// Errors from reading or writing cartridge files.
///
/// File-system failures stay distinct from format failures.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Cartridge(#[from] CartridgeError),
}
