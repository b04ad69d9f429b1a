use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use eventwhisper_types::Param;
use regex::Regex;

use crate::quotes::strip_wrapping_quotes;

static UTC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+UTC$").expect("UTC suffix pattern is valid"));

/// `YYYY-MM-DDTHH` with an optional offset; chrono needs minutes to build a time
static HOUR_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}[T ]\d{2})([+-].*)?$").expect("hour-only pattern is valid")
});

/// ISO-8601 shapes carrying an explicit offset. `%z` accepts `+02:00` and `+0200`.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

/// Date+time shapes without a zone; these are read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalize a timestamp parameter to UTC.
///
/// Accepts structured timestamps (zone-less ones are taken as UTC) and text
/// such as:
///
/// - `2025-01-02T03:04:05.123456+02:00`
/// - `2025-01-02T03:04:05Z`, `2025-01-02T03:04`, `2025-01-02T03`
/// - `2025-01-02 03:04:05[.ffffff][ UTC]`
/// - `2025-01-02`
///
/// Text may be wrapped in quotes or backticks. Anything that does not parse
/// yields `fallback`.
pub fn normalize_timestamp(
    value: &Param,
    fallback: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    match value {
        Param::Time(t) => Some(t.with_timezone(&Utc)),
        Param::NaiveTime(t) => Some(t.and_utc()),
        Param::Text(s) => parse_text(s).or(fallback),
        _ => fallback,
    }
}

fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
    let unwrapped = strip_wrapping_quotes(raw);
    let without_suffix = UTC_SUFFIX.replace(unwrapped, "");
    let trimmed = without_suffix.trim();
    let s = match trimmed.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => trimmed.to_string(),
    };
    let s = HOUR_ONLY.replace(&s, "${1}:00${2}");
    let s: &str = &s;

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(|t| t.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|t| t.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|t| t.and_utc())
        })
}
