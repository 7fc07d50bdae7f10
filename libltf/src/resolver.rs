//! Key resolution
//!
//! Turns a dotted path into the offset where its value starts. Every lookup
//! is one linear pass from the top of the buffer:
//!
//! 1. skip leading comments and whitespace,
//! 2. if the path names a section, walk `[name]` headers until one matches,
//! 3. bound the search by the next `[` (or the end of text),
//! 4. walk `key = value` lines, skipping whole value tokens, until the leaf
//!    key matches.

use tracing::trace;

use crate::scanner::{find_any, skip_ignorable, skip_past, skip_value, KEY_END};

/// A lookup path split into its optional section and leaf key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPath<'a> {
    pub section: Option<&'a str>,
    pub key: &'a str,
}

impl<'a> KeyPath<'a> {
    /// Split at the last `.`. A `.` at index 0 does not start a section.
    pub fn parse(path: &'a str) -> Self {
        match path.rfind('.') {
            Some(dot) if dot > 0 => KeyPath {
                section: Some(&path[..dot]),
                key: &path[dot + 1..],
            },
            _ => KeyPath {
                section: None,
                key: path,
            },
        }
    }
}

/// Offset of the first unit of the value stored under `path`.
pub fn find(text: &[u16], path: &str) -> Option<usize> {
    let path = KeyPath::parse(path);
    if path.key.is_empty() {
        return None;
    }

    let mut pos = skip_ignorable(text, 0)?;

    if let Some(section) = path.section {
        let name: Vec<u16> = section.encode_utf16().collect();
        pos = find_section(text, pos, &name)?;
        trace!(section, pos, "section found");
        pos = skip_ignorable(text, pos)?;
    }

    let limit = find_any(text, pos, b"[").unwrap_or(text.len());
    trace!(pos, limit, "scanning scope");

    let key: Vec<u16> = path.key.encode_utf16().collect();
    find_key(text, pos, limit, &key)
}

/// Offset just past the `]` of the first `[name]` header equal to `name`.
fn find_section(text: &[u16], from: usize, name: &[u16]) -> Option<usize> {
    let mut pos = from;
    loop {
        let start = skip_past(text, pos, b"[")?;
        let end = find_any(text, start, b"]")?;
        if text[start..end] == *name {
            return Some(end + 1);
        }
        pos = start;
    }
}

/// Walk `key = value` lines in `from..limit` looking for `key`.
fn find_key(text: &[u16], from: usize, limit: usize, key: &[u16]) -> Option<usize> {
    let mut pos = from;
    while pos < limit {
        let key_end = find_any(text, pos, KEY_END)?;
        let matched = text[pos..key_end] == *key;
        if tracing::enabled!(tracing::Level::TRACE) {
            let candidate = String::from_utf16_lossy(&text[pos..key_end]);
            trace!(%candidate, matched, "candidate key");
        }

        pos = skip_past(text, key_end, b"=")?;
        pos = skip_ignorable(text, pos)?;
        if matched {
            return Some(pos);
        }

        pos += skip_value(text, pos)?;
        pos = skip_ignorable(text, pos)?;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    /// Value text starting at the resolved offset, up to end of line.
    fn value_at(src: &str, path: &str) -> Option<String> {
        let text = units(src);
        let pos = find(&text, path)?;
        let rest = String::from_utf16_lossy(&text[pos..]);
        Some(rest.lines().next().unwrap_or("").to_string())
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(
            KeyPath::parse("a.b"),
            KeyPath {
                section: Some("a"),
                key: "b"
            }
        );
        assert_eq!(
            KeyPath::parse("file.creation.server_side"),
            KeyPath {
                section: Some("file.creation"),
                key: "server_side"
            }
        );
        assert_eq!(
            KeyPath::parse("key"),
            KeyPath {
                section: None,
                key: "key"
            }
        );
        assert_eq!(
            KeyPath::parse(".key"),
            KeyPath {
                section: None,
                key: ".key"
            }
        );
        assert_eq!(
            KeyPath::parse("a."),
            KeyPath {
                section: Some("a"),
                key: ""
            }
        );
    }

    #[test]
    fn test_root_key() {
        let src = "// header\nfirst = 1\nsecond = two\n";
        assert_eq!(value_at(src, "first").as_deref(), Some("1"));
        assert_eq!(value_at(src, "second").as_deref(), Some("two"));
        assert_eq!(value_at(src, "third"), None);
    }

    #[test]
    fn test_offset_is_value_start() {
        let text = units("/* c */ k =   v\n");
        assert_eq!(find(&text, "k"), Some(14));
    }

    #[test]
    fn test_root_scope_stops_at_first_section() {
        let src = "a = 1\n[s]\nb = 2\n";
        assert_eq!(value_at(src, "a").as_deref(), Some("1"));
        assert_eq!(value_at(src, "b"), None);
        assert_eq!(value_at(src, "s.b").as_deref(), Some("2"));
    }

    #[test]
    fn test_section_scoping() {
        let src = "x = root\n[a]\nx = in_a\n[b]\nx = in_b\ny = only_b\n";
        assert_eq!(value_at(src, "x").as_deref(), Some("root"));
        assert_eq!(value_at(src, "a.x").as_deref(), Some("in_a"));
        assert_eq!(value_at(src, "b.x").as_deref(), Some("in_b"));
        assert_eq!(value_at(src, "a.y"), None);
        assert_eq!(value_at(src, "c.x"), None);
    }

    #[test]
    fn test_section_name_must_match_exactly() {
        let src = "[ab]\nx = 1\n[a]\nx = 2\n";
        assert_eq!(value_at(src, "a.x").as_deref(), Some("2"));
        assert_eq!(value_at(src, "ab.x").as_deref(), Some("1"));
        assert_eq!(value_at(src, "abc.x"), None);
    }

    #[test]
    fn test_dotted_section_name() {
        let src = "[file.creation]\nserver_side = true\n";
        assert_eq!(
            value_at(src, "file.creation.server_side").as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_key_prefix_does_not_match() {
        let src = "enable_side = 1\nenable = 2\n";
        assert_eq!(value_at(src, "enable").as_deref(), Some("2"));
    }

    #[test]
    fn test_skips_all_value_shapes() {
        let src = "a = `x = y`\nb = \"q \\\" r\"\nc = bare// note\nd = found\n";
        assert_eq!(value_at(src, "d").as_deref(), Some("found"));
    }

    #[test]
    fn test_comments_between_lines() {
        let src = "a = 1 /* block\n spanning */\n// line\nb = 2 // trailing\nc = 3\n";
        assert_eq!(value_at(src, "b").as_deref(), Some("2 // trailing"));
        assert_eq!(value_at(src, "c").as_deref(), Some("3"));
    }

    #[test]
    fn test_malformed_value_stops_resolution() {
        let src = "a = \"open\nb = 2\n";
        assert_eq!(value_at(src, "b"), None);
    }

    #[test]
    fn test_empty_and_blank_buffers() {
        assert_eq!(find(&units(""), "a"), None);
        assert_eq!(find(&units("  \n // c\n"), "a"), None);
        assert_eq!(find(&units("a = 1\n"), "s."), None);
    }
}
