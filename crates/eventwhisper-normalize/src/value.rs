use eventwhisper_types::Param;

use crate::quotes::strip_wrapping_quotes;

/// Parse an integer from an int or a (possibly quoted) base-10 string.
///
/// Booleans, floats, lists and timestamps are rejected.
pub fn parse_int(value: &Param) -> Option<i64> {
    match value {
        Param::Int(i) => Some(*i),
        Param::Text(s) => {
            let s = strip_wrapping_quotes(s);
            s.parse().ok().or_else(|| saturate(s))
        }
        _ => None,
    }
}

/// Clamp a base-10 token that is well-formed but too wide for i64
fn saturate(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// Normalize a limit-style parameter.
///
/// A missing value (`Null`) becomes `default`. Anything non-positive or
/// unparseable becomes `None`, which callers treat as "return nothing".
pub fn normalize_positive_int(value: &Param, default: usize) -> Option<usize> {
    if value.is_null() {
        return Some(default);
    }
    parse_int(value)
        .filter(|i| *i > 0)
        .map(|i| usize::try_from(i).unwrap_or(usize::MAX))
}
