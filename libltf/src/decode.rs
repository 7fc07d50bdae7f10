//! Value decoders
//!
//! Each decoder reads the token at an offset produced by the resolver and
//! converts it to a typed value. Bare tokens end at space, tab, CR, LF, `/`
//! or the end of text, the same rule `scanner::skip_value` uses.

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Zero};

use crate::scanner::{find_any, find_string_end, token_len, unit_at};

const PLUS: u16 = b'+' as u16;
const MINUS: u16 = b'-' as u16;
const ZERO: u16 = b'0' as u16;
const SEVEN: u16 = b'7' as u16;
const BACKTICK: u16 = b'`' as u16;
const QUOTE: u16 = b'"' as u16;

/// The bare token at `pos`, possibly empty.
fn bare_token(text: &[u16], pos: usize) -> &[u16] {
    text.get(pos..pos + token_len(text, pos)).unwrap_or(&[])
}

fn eq_ignore_ascii_case(token: &[u16], word: &str) -> bool {
    token.len() == word.len()
        && token
            .iter()
            .zip(word.bytes())
            .all(|(&unit, b)| unit < 0x80 && (unit as u8).eq_ignore_ascii_case(&b))
}

fn is_unit(unit: u16, lower: u8) -> bool {
    unit < 0x80 && (unit as u8).to_ascii_lowercase() == lower
}

/// `true` or `false`, in any letter case.
pub fn decode_bool(text: &[u16], pos: usize) -> Option<bool> {
    let token = bare_token(text, pos);
    if eq_ignore_ascii_case(token, "true") {
        Some(true)
    } else if eq_ignore_ascii_case(token, "false") {
        Some(false)
    } else {
        None
    }
}

/// Signed integer with C-style base prefixes.
///
/// Accepts an optional sign, then `0`, `0b...`, `0x...`, `0...` (octal) or a
/// decimal literal. Fails on any digit outside the active base, on an empty
/// digit run, and when the value does not fit in `T`.
pub fn decode_integer<T>(text: &[u16], pos: usize) -> Option<T>
where
    T: Zero + CheckedMul + CheckedAdd + CheckedSub + From<u8>,
{
    let mut token = bare_token(text, pos);
    let mut negative = false;
    match token.first() {
        Some(&PLUS) => token = &token[1..],
        Some(&MINUS) => {
            negative = true;
            token = &token[1..];
        }
        _ => {}
    }

    let (radix, digits) = match token {
        [] => return None,
        [ZERO] => return Some(T::zero()),
        [ZERO, b, rest @ ..] if is_unit(*b, b'b') => (2, rest),
        [ZERO, x, rest @ ..] if is_unit(*x, b'x') => (16, rest),
        [ZERO, rest @ ..] if matches!(rest.first(), Some(&(ZERO..=SEVEN))) => (8, rest),
        [ZERO, ..] => return None,
        _ => (10, token),
    };

    accumulate(digits, radix, negative)
}

/// Fold digits into `T` with overflow checks. Negative values accumulate
/// downward so the type's minimum stays reachable.
fn accumulate<T>(digits: &[u16], radix: u32, negative: bool) -> Option<T>
where
    T: Zero + CheckedMul + CheckedAdd + CheckedSub + From<u8>,
{
    if digits.is_empty() {
        return None;
    }
    let base = T::from(radix as u8);
    let mut acc = T::zero();
    for &unit in digits {
        let digit = char::from_u32(u32::from(unit))?.to_digit(radix)?;
        let digit = T::from(digit as u8);
        acc = acc.checked_mul(&base)?;
        acc = if negative {
            acc.checked_sub(&digit)?
        } else {
            acc.checked_add(&digit)?
        };
    }
    Some(acc)
}

/// The whole bare token must parse as an `f64`.
pub fn decode_float(text: &[u16], pos: usize) -> Option<f64> {
    let token = bare_token(text, pos);
    if token.is_empty() {
        return None;
    }
    String::from_utf16(token).ok()?.parse().ok()
}

/// Backtick or double-quoted string.
///
/// Backtick strings are copied verbatim. Quoted strings end at the first `"`
/// not preceded by a backslash; escapes are kept as written. At most
/// `max_len - 1` code units are copied.
pub fn decode_string(text: &[u16], pos: usize, max_len: usize) -> Option<String> {
    let start = pos + 1;
    let end = match unit_at(text, pos) {
        BACKTICK => find_any(text, start, b"`")?,
        QUOTE => find_string_end(text, start)?,
        _ => return None,
    };
    let len = (end - start).min(max_len.saturating_sub(1));
    Some(String::from_utf16_lossy(&text[start..start + len]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use std::str::FromStr;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn int(s: &str) -> Option<i64> {
        decode_integer(&units(s), 0)
    }

    fn string(s: &str) -> Option<String> {
        decode_string(&units(s), 0, 256)
    }

    #[test]
    fn test_bool() {
        for s in ["true", "True", "TRUE", "tRuE\n", "true// c"] {
            assert_eq!(decode_bool(&units(s), 0), Some(true), "{s:?}");
        }
        for s in ["false", "FALSE", "False "] {
            assert_eq!(decode_bool(&units(s), 0), Some(false), "{s:?}");
        }
        for s in ["tru", "truee", "1", "", "yes", "\"true\""] {
            assert_eq!(decode_bool(&units(s), 0), None, "{s:?}");
        }
    }

    #[test]
    fn test_int_bases() {
        assert_eq!(int("0x1F"), Some(31));
        assert_eq!(int("0X1f"), Some(31));
        assert_eq!(int("0b101"), Some(5));
        assert_eq!(int("0B11"), Some(3));
        assert_eq!(int("017"), Some(15));
        assert_eq!(int("-0x10"), Some(-16));
        assert_eq!(int("+42"), Some(42));
        assert_eq!(int("-7 // c"), Some(-7));
        assert_eq!(int("0"), Some(0));
        assert_eq!(int("-0"), Some(0));
        assert_eq!(int("1234567890"), Some(1234567890));
    }

    #[test]
    fn test_int_invalid() {
        assert_eq!(int("09"), None);
        assert_eq!(int("08"), None);
        assert_eq!(int("0b102"), None);
        assert_eq!(int("0x"), None);
        assert_eq!(int("0xg"), None);
        assert_eq!(int("12a"), None);
        assert_eq!(int("-"), None);
        assert_eq!(int("+"), None);
        assert_eq!(int("+-1"), None);
        assert_eq!(int(""), None);
        assert_eq!(int("`1`"), None);
        assert_eq!(int("1.5"), None);
    }

    #[test]
    fn test_int_overflow() {
        assert_eq!(int("9223372036854775807"), Some(i64::MAX));
        assert_eq!(int("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(int("9223372036854775808"), None);
        assert_eq!(int("0xffffffffffffffff"), None);

        let big: Option<BigInt> = decode_integer(&units("0xffffffffffffffff"), 0);
        assert_eq!(big, BigInt::from_str("18446744073709551615").ok());
        let big: Option<BigInt> = decode_integer(&units("-99999999999999999999"), 0);
        assert_eq!(big, BigInt::from_str("-99999999999999999999").ok());
    }

    #[test]
    fn test_float() {
        assert_eq!(decode_float(&units("1.5"), 0), Some(1.5));
        assert_eq!(decode_float(&units("-2.25e2 // c"), 0), Some(-225.0));
        assert_eq!(decode_float(&units("3"), 0), Some(3.0));
        assert_eq!(decode_float(&units(".5\n"), 0), Some(0.5));
        assert_eq!(decode_float(&units(""), 0), None);
        assert_eq!(decode_float(&units(" 1.0"), 0), None);
        assert_eq!(decode_float(&units("1.5abc"), 0), None);
        assert_eq!(decode_float(&units("`1.5`"), 0), None);
    }

    #[test]
    fn test_string_backtick() {
        assert_eq!(string("`hello`").as_deref(), Some("hello"));
        assert_eq!(string("`a \"b\" \\n`").as_deref(), Some("a \"b\" \\n"));
        assert_eq!(string("``").as_deref(), Some(""));
    }

    #[test]
    fn test_string_quoted_keeps_escapes() {
        let s = string(r#""he said \"hi\"" // c"#);
        assert_eq!(s.as_deref(), Some(r#"he said \"hi\""#));
    }

    #[test]
    fn test_string_truncation() {
        let text = units("`abcdef`");
        assert_eq!(decode_string(&text, 0, 4).as_deref(), Some("abc"));
        assert_eq!(decode_string(&text, 0, 1).as_deref(), Some(""));
        assert_eq!(decode_string(&text, 0, 0).as_deref(), Some(""));
        assert_eq!(decode_string(&text, 0, 7).as_deref(), Some("abcdef"));

        let text = units(r#""a\"b""#);
        assert_eq!(decode_string(&text, 0, 3).as_deref(), Some("a\\"));
    }

    #[test]
    fn test_string_failures() {
        assert_eq!(string("\"abc"), None);
        assert_eq!(string("\"abc\\\""), None);
        assert_eq!(string("`abc"), None);
        assert_eq!(string("abc"), None);
        assert_eq!(string(""), None);
    }

    #[test]
    fn test_string_non_ascii() {
        assert_eq!(string("`héllo wörld`").as_deref(), Some("héllo wörld"));
    }
}
