//! Shared types for eventwhisper
//!
//! This crate contains data structures used across the normalization and
//! filtering crates: the caller-facing [`Param`] input type, the decoder's
//! [`RawRecord`], the [`FilterRequest`] parameter set, and the configured
//! [`Limits`].

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Well-known locations
// ============================================================================

/// Dotted path of the event identifier inside a decoded record
pub const EVENT_ID_PATH: &str = "Event.System.EventID";

/// Dotted path of the record's creation timestamp
pub const SYSTEM_TIME_PATH: &str = "Event.System.TimeCreated.#attributes.SystemTime";

/// Top-level envelope key that projection falls back into
pub const EVENT_ENVELOPE_KEY: &str = "Event";

/// File extension of Windows event log files
pub const EVTX_EXTENSION: &str = "evtx";

// ============================================================================
// Caller Parameters
// ============================================================================

/// A loosely-typed caller input.
///
/// Tool callers hand over numbers, strings, quoted strings, JSON arrays or
/// real arrays interchangeably. Every shape is mapped onto this closed set once
/// at the boundary so the normalizers only ever match on one type.
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum Param {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Param>),
    /// A timestamp that already carries an offset
    Time(DateTime<FixedOffset>),
    /// A timestamp without any zone information
    NaiveTime(NaiveDateTime),
}

impl Param {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Render a scalar as text, the way list tokens see it.
    ///
    /// Lists have no single textual form and return `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null | Self::List(_) => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            // Debug keeps the fraction, so 3.0 never reads as an integer token
            Self::Float(f) => Some(format!("{f:?}")),
            Self::Text(s) => Some(s.clone()),
            Self::Time(t) => Some(t.to_rfc3339()),
            Self::NaiveTime(t) => Some(t.to_string()),
        }
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Int(i),
                // Too large for i64, saturate and let callers clamp
                (None, Some(_)) => Self::Int(i64::MAX),
                (None, None) => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            // Objects are not a meaningful parameter shape; keep their text so
            // string lists still see something
            obj @ Value::Object(_) => Self::Text(obj.to_string()),
        }
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Param {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Param {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<bool> for Param {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Param {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<DateTime<Utc>> for Param {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Time(t.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for Param {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Self::Time(t)
    }
}

impl From<NaiveDateTime> for Param {
    fn from(t: NaiveDateTime) -> Self {
        Self::NaiveTime(t)
    }
}

impl<T: Into<Param>> From<Vec<T>> for Param {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Un-normalized parameters of a filter call.
///
/// Every field defaults to [`Param::Null`], meaning "not supplied".
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    pub start: Param,
    pub end: Param,
    pub results_limit: Param,
    pub scan_limit: Param,
    pub event_ids: Param,
    pub contains: Param,
    pub not_contains: Param,
    pub fields: Param,
}

// ============================================================================
// Records
// ============================================================================

/// One undecoded unit handed over by the event log decoder
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    /// JSON payload text (if the decoder produced any)
    pub data: Option<String>,

    /// Scan-order timestamp used when the payload carries none
    pub timestamp: Param,
}

impl RawRecord {
    pub fn new(data: impl Into<String>, timestamp: impl Into<Param>) -> Self {
        Self {
            data: Some(data.into()),
            timestamp: timestamp.into(),
        }
    }
}

/// Flat mapping of requested dotted path to resolved value (or null)
pub type ProjectedEvent = serde_json::Map<String, Value>;

// ============================================================================
// Limits
// ============================================================================

pub const DEFAULT_RESULTS_LIMIT: usize = 1_000;
pub const MAX_RESULTS_LIMIT: usize = 10_000;
pub const DEFAULT_SCAN_LIMIT: usize = 100_000;
pub const MAX_SCAN_LIMIT: usize = 1_000_000;

/// Defaults and hard ceilings for the two per-call limits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Limits {
    #[serde(default = "default_results_limit")]
    pub default_results_limit: usize,
    #[serde(default = "max_results_limit")]
    pub max_results_limit: usize,
    #[serde(default = "default_scan_limit")]
    pub default_scan_limit: usize,
    #[serde(default = "max_scan_limit")]
    pub max_scan_limit: usize,
}

fn default_results_limit() -> usize {
    DEFAULT_RESULTS_LIMIT
}

fn max_results_limit() -> usize {
    MAX_RESULTS_LIMIT
}

fn default_scan_limit() -> usize {
    DEFAULT_SCAN_LIMIT
}

fn max_scan_limit() -> usize {
    MAX_SCAN_LIMIT
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            default_results_limit: DEFAULT_RESULTS_LIMIT,
            max_results_limit: MAX_RESULTS_LIMIT,
            default_scan_limit: DEFAULT_SCAN_LIMIT,
            max_scan_limit: MAX_SCAN_LIMIT,
        }
    }
}
