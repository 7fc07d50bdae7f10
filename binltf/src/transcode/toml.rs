//! TOML output: render looked-up LTF values as a TOML document.
//!
//! Mapping from LTF to TOML:
//!   - root key            -> top-level key
//!   - `section.key`       -> key inside the table named by the whole section
//!                            (`[file.creation]` becomes `["file.creation"]`)
//!   - Value::Bool         -> TOML boolean
//!   - Value::Integer      -> TOML integer (if fits in i64, otherwise error)
//!   - Value::Float        -> TOML float
//!   - Value::String       -> TOML string
//!
//! Lossy edges:
//!   - TOML integers are i64; larger LTF integers error.
//!   - A root key with the same name as a section errors.

use libltf::{KeyPath, Value};
use num_traits::ToPrimitive;
use toml_edit::DocumentMut;

/// Encode `(path, value)` pairs as a TOML string.
pub fn encode(entries: &[(String, Value)]) -> Result<String, String> {
    let mut doc = DocumentMut::new();
    for (path, value) in entries {
        let key_path = KeyPath::parse(path);
        let item = value_to_toml(value)?;
        match key_path.section {
            None => {
                if doc.get(key_path.key).is_some_and(|existing| existing.is_table()) {
                    return Err(format!("{} is both a key and a section", key_path.key));
                }
                doc.insert(key_path.key, item);
            }
            Some(section) => {
                let table = doc
                    .entry(section)
                    .or_insert(toml_edit::table())
                    .as_table_mut()
                    .ok_or_else(|| format!("{} is both a key and a section", section))?;
                table.insert(key_path.key, item);
            }
        }
    }
    Ok(doc.to_string())
}

fn value_to_toml(value: &Value) -> Result<toml_edit::Item, String> {
    let value = match value {
        Value::Bool(b) => toml_edit::Value::Boolean(toml_edit::Formatted::new(*b)),
        Value::Integer(n) => {
            let i = n
                .to_i64()
                .ok_or_else(|| format!("Integer {} too large for TOML (i64)", n))?;
            toml_edit::Value::Integer(toml_edit::Formatted::new(i))
        }
        Value::Float(f) => toml_edit::Value::Float(toml_edit::Formatted::new(*f)),
        Value::String(s) => toml_edit::Value::String(toml_edit::Formatted::new(s.clone())),
    };
    Ok(toml_edit::Item::Value(value))
}
