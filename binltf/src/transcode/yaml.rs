//! YAML output: render looked-up LTF values as a YAML mapping.
//!
//! Mapping from LTF to YAML:
//!   - root key            -> top-level mapping key
//!   - `section.key`       -> key inside the mapping named by the whole section
//!   - Value::Bool         -> YAML bool
//!   - Value::Integer      -> YAML integer (arbitrary precision as string if > i64/u64)
//!   - Value::Float        -> YAML float (including .nan, .inf, -.inf)
//!   - Value::String       -> YAML string

use libltf::{KeyPath, Value};
use num_traits::ToPrimitive;

/// Encode `(path, value)` pairs as a YAML string.
pub fn encode(entries: &[(String, Value)]) -> Result<String, String> {
    let mut root = serde_yaml::Mapping::new();
    for (path, value) in entries {
        let key_path = KeyPath::parse(path);
        let key = serde_yaml::Value::String(key_path.key.to_string());
        let value = value_to_yaml(value);
        match key_path.section {
            None => {
                if root.get(&key).is_some_and(|existing| existing.is_mapping()) {
                    return Err(format!("{} is both a key and a section", key_path.key));
                }
                root.insert(key, value);
            }
            Some(section) => {
                let section_key = serde_yaml::Value::String(section.to_string());
                let table = root
                    .entry(section_key)
                    .or_insert_with(|| serde_yaml::Value::Mapping(serde_yaml::Mapping::new()))
                    .as_mapping_mut()
                    .ok_or_else(|| format!("{} is both a key and a section", section))?;
                table.insert(key, value);
            }
        }
    }
    serde_yaml::to_string(&serde_yaml::Value::Mapping(root))
        .map_err(|e| format!("YAML encode error: {}", e))
}

fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Integer(n) => {
            // Try to fit in i64 first, then u64
            if let Some(i) = n.to_i64() {
                serde_yaml::Value::Number(serde_yaml::Number::from(i))
            } else if let Some(u) = n.to_u64() {
                serde_yaml::Value::Number(serde_yaml::Number::from(u))
            } else {
                serde_yaml::Value::String(n.to_string())
            }
        }
        Value::Float(f) => serde_yaml::Value::Number(serde_yaml::Number::from(*f)),
        Value::String(s) => serde_yaml::Value::String(s.clone()),
    }
}
