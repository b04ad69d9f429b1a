//! Filtered streaming access to Windows event log records
//!
//! This crate provides record decoding, dotted-path lookup, projection,
//! filtering, and log file discovery. The two entry points used by callers are
//! [`list_evtx_files`] and [`filter_events`]; both degrade to an empty result
//! instead of failing.

mod event_id;
mod files;
mod filter;
mod filter_spec;
mod path;
mod projection;
mod source;

use std::path::Path;

use eventwhisper_normalize::strip_wrapping_quotes;
use serde_json::Value;

pub use event_id::coerce_event_id;
pub use files::list_evtx_files;
pub use filter::EventFilter;
pub use filter_spec::{FilterSpec, KeywordFilter};
pub use path::resolve;
pub use projection::project;
pub use source::{EvtxSource, SourceError};

// Re-export types used in our public API
pub use eventwhisper_types::{FilterRequest, Limits, Param, ProjectedEvent, RawRecord};

/// Filter one event log file and return each surviving record as JSON text.
///
/// Invalid limits, a missing file, or a file the decoder cannot open all
/// produce an empty list. A decoding failure part-way through returns what
/// was collected up to that point.
pub fn filter_events(provider: &str, request: &FilterRequest, limits: &Limits) -> Vec<String> {
    let path = Path::new(strip_wrapping_quotes(provider));
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "provider is not a file");
        return Vec::new();
    }

    let Some(spec) = FilterSpec::from_request(request, limits) else {
        tracing::debug!("limits rejected, returning no records");
        return Vec::new();
    };

    let mut source = match EvtxSource::open(path) {
        Ok(source) => source,
        Err(err) => {
            tracing::debug!(error = %err, "cannot open event log");
            return Vec::new();
        }
    };

    let mut events = EventFilter::new(source.records(), spec);
    let out = serialize_events(events.by_ref());
    tracing::debug!(
        path = %path.display(),
        scanned = events.scanned(),
        returned = events.returned(),
        "filter finished"
    );
    out
}

/// Serialize records to compact JSON strings, preserving key order
pub fn serialize_events(events: impl Iterator<Item = Value>) -> Vec<String> {
    events
        .filter_map(|event| serde_json::to_string(&event).ok())
        .collect()
}
