//! A loaded LTF document and its typed getters.

use num_bigint::BigInt;

use crate::decode::{decode_bool, decode_float, decode_integer, decode_string};
use crate::resolver;
use crate::Value;

/// An immutable LTF document held as UTF-16 code units, BOM removed.
///
/// Every getter resolves its path with a fresh scan from the top of the
/// buffer and returns `None` when the key is missing, the surrounding syntax
/// is malformed, or the value does not decode as the requested type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    units: Vec<u16>,
}

impl Document {
    /// Wrap already-decoded UTF-16 code units.
    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units }
    }

    /// Build a document from Rust text.
    ///
    /// ```
    /// use libltf::Document;
    ///
    /// let doc = Document::from_text("[net]\nport = 0x1F90\n");
    /// assert_eq!(doc.get_int("net.port"), Some(8080));
    /// ```
    pub fn from_text(text: &str) -> Self {
        Self::from_units(text.encode_utf16().collect())
    }

    /// The document's code units.
    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// Number of code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Offset of the first unit of the value stored under `path`.
    pub fn find(&self, path: &str) -> Option<usize> {
        resolver::find(&self.units, path)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        decode_bool(&self.units, self.find(path)?)
    }

    /// Integer value, `None` if it does not fit in an `i64`.
    pub fn get_int(&self, path: &str) -> Option<i64> {
        decode_integer(&self.units, self.find(path)?)
    }

    /// Integer value without a size limit.
    pub fn get_big_int(&self, path: &str) -> Option<BigInt> {
        decode_integer(&self.units, self.find(path)?)
    }

    pub fn get_float(&self, path: &str) -> Option<f64> {
        decode_float(&self.units, self.find(path)?)
    }

    /// String value, truncated to at most `max_len - 1` code units.
    pub fn get_string(&self, path: &str, max_len: usize) -> Option<String> {
        decode_string(&self.units, self.find(path)?, max_len)
    }

    /// Value of whichever type decodes first: bool, integer, float, string.
    pub fn get(&self, path: &str) -> Option<Value> {
        let pos = self.find(path)?;
        let units = &self.units;
        decode_bool(units, pos)
            .map(Value::Bool)
            .or_else(|| decode_integer(units, pos).map(Value::Integer))
            .or_else(|| decode_float(units, pos).map(Value::Float))
            .or_else(|| decode_string(units, pos, usize::MAX).map(Value::String))
    }
}
