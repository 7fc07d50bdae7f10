//! Scanner primitives
//!
//! Stateless helpers over a slice of UTF-16 code units. Every function takes
//! the text and an absolute start offset. The end of the slice, or an
//! embedded NUL code unit, terminates every scan.
//!
//! Offsets returned by `find_any`, `skip_past` and `skip_ignorable` are
//! absolute. `skip_value` and `token_len` return lengths.

/// Space, tab, CR and LF.
pub const WHITESPACE: &[u8] = b" \t\r\n";

/// Units that end a bare value token.
pub const VALUE_END: &[u8] = b" \t\r\n/";

/// Units that end a candidate key.
pub const KEY_END: &[u8] = b" \t";

const NUL: u16 = 0;
const SLASH: u16 = b'/' as u16;
const STAR: u16 = b'*' as u16;
const BACKSLASH: u16 = b'\\' as u16;
const BACKTICK: u16 = b'`' as u16;
const QUOTE: u16 = b'"' as u16;

/// Code unit at `pos`, or NUL past the end.
#[inline]
pub fn unit_at(text: &[u16], pos: usize) -> u16 {
    text.get(pos).copied().unwrap_or(NUL)
}

#[inline]
fn in_set(unit: u16, set: &[u8]) -> bool {
    unit < 0x80 && set.contains(&(unit as u8))
}

/// Find the first unit at or after `from` that belongs to `set`.
pub fn find_any(text: &[u16], from: usize, set: &[u8]) -> Option<usize> {
    let mut pos = from;
    loop {
        let unit = unit_at(text, pos);
        if unit == NUL {
            return None;
        }
        if in_set(unit, set) {
            return Some(pos);
        }
        pos += 1;
    }
}

/// One past the first unit found by `find_any`.
pub fn skip_past(text: &[u16], from: usize, set: &[u8]) -> Option<usize> {
    find_any(text, from, set).map(|pos| pos + 1)
}

/// Skip whitespace, `// line` comments and `/* block */` comments.
///
/// Returns the offset of the first unit that is none of these. Fails at the
/// end of text, on an unterminated comment, and on a `/` that starts neither
/// comment style.
pub fn skip_ignorable(text: &[u16], from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        match unit_at(text, pos) {
            NUL => return None,
            unit if in_set(unit, WHITESPACE) => pos += 1,
            SLASH => match unit_at(text, pos + 1) {
                SLASH => pos = skip_past(text, pos + 2, b"\n")?,
                STAR => pos = skip_block_comment(text, pos + 2)?,
                _ => return None,
            },
            _ => return Some(pos),
        }
    }
}

/// `from` points just inside `/*`. Returns the offset after the closing `*/`.
fn skip_block_comment(text: &[u16], from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let star = find_any(text, pos, b"*")?;
        if unit_at(text, star + 1) == SLASH {
            return Some(star + 2);
        }
        pos = star + 1;
    }
}

/// Offset of the `"` closing a quoted string whose content starts at `from`.
///
/// A `"` directly preceded by a backslash does not close the string.
pub fn find_string_end(text: &[u16], from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let quote = find_any(text, pos, b"\"")?;
        let escaped = quote
            .checked_sub(1)
            .map_or(false, |prev| unit_at(text, prev) == BACKSLASH);
        if !escaped {
            return Some(quote);
        }
        pos = quote + 1;
    }
}

/// Length of a bare token: everything up to `VALUE_END` or the end of text.
pub fn token_len(text: &[u16], from: usize) -> usize {
    let mut len = 0;
    loop {
        let unit = unit_at(text, from + len);
        if unit == NUL || in_set(unit, VALUE_END) {
            return len;
        }
        len += 1;
    }
}

/// Length of one value token starting at `from`, delimiters included.
pub fn skip_value(text: &[u16], from: usize) -> Option<usize> {
    match unit_at(text, from) {
        BACKTICK => find_any(text, from + 1, b"`").map(|close| close + 1 - from),
        QUOTE => find_string_end(text, from + 1).map(|close| close + 1 - from),
        _ => Some(token_len(text, from)),
    }
}
