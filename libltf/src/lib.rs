//! LTF reader implementation.
//!
//! LTF is a small, hand-edited configuration format: `[section]` headers
//! followed by `key = value` lines, with `//` and `/* */` comments allowed
//! between any two tokens. Files are stored as UTF-16LE with a byte-order
//! mark.
//!
//! # Lookup Pipeline
//!
//! 1. **Loader**: validates the byte-order mark and length, then turns the
//!    bytes into UTF-16 code units held by a [`Document`].
//!
//! 2. **Resolver**: splits a dotted path into section and key, then scans
//!    the document from the top for the matching `key = value` line.
//!
//! 3. **Decoder**: converts the token at the resolved offset into a bool,
//!    integer, float or string.
//!
//! Nothing is cached between lookups; each getter performs its own scan.

mod decode;
mod document;
mod error;
mod resolver;
mod scanner;
mod value;

use std::path::Path;

use tracing::debug;

pub use document::Document;
pub use error::{LoadError, Result};
pub use resolver::KeyPath;
pub use value::Value;

/// Byte-order mark of a UTF-16LE file.
pub const BOM: [u8; 2] = [0xFF, 0xFE];

/// Load an LTF document from a file.
///
/// # Example
///
/// ```no_run
/// let doc = libltf::load("rpc/config.txt").unwrap();
/// let server_side = doc.get_bool("file.creation.server_side").unwrap_or(false);
/// ```
pub fn load(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_bytes(&bytes)?;
    debug!(path = %path.display(), units = doc.len(), "loaded document");
    Ok(doc)
}

/// Validate raw UTF-16LE bytes (BOM included) and build a document.
///
/// Code units are taken as they are; unpaired surrogates are not rejected.
///
/// ```
/// let doc = libltf::parse_bytes(&[0xFF, 0xFE, b'a', 0, b'=', 0, b'1', 0]).unwrap();
/// assert_eq!(doc.len(), 3);
/// ```
pub fn parse_bytes(bytes: &[u8]) -> Result<Document> {
    if bytes.len() % 2 != 0 {
        return Err(LoadError::OddLength(bytes.len()));
    }
    if bytes.len() < BOM.len() {
        return Err(LoadError::TooShort(bytes.len()));
    }
    if bytes[..2] != BOM {
        return Err(LoadError::MissingBom);
    }

    let units = bytes[2..]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(Document::from_units(units))
}
