//! Error types for loading LTF documents.
//!
//! Only loading can fail with an error. Lookups and decoding report failure
//! as `None`, leaving the default-or-abort decision to the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for LTF loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Error type for loading an LTF document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read in full.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Byte length is odd, so it cannot hold UTF-16 code units.
    #[error("odd byte length {0} (expected UTF-16LE)")]
    OddLength(usize),

    /// Too short to hold a byte-order mark.
    #[error("file too short ({0} bytes) to hold a UTF-16LE byte-order mark")]
    TooShort(usize),

    /// First two bytes are not `FF FE`.
    #[error("no UTF-16LE byte-order mark (expected FF FE)")]
    MissingBom,
}

impl LoadError {
    /// Returns `true` for errors about the content rather than the file system.
    pub fn is_format(&self) -> bool {
        !matches!(self, LoadError::Io { .. })
    }
}
