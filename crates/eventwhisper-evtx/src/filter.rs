use std::fmt::Display;

use eventwhisper_normalize::normalize_timestamp;
use eventwhisper_types::{EVENT_ID_PATH, Param, RawRecord, SYSTEM_TIME_PATH};
use serde_json::Value;
use thiserror::Error;

use crate::event_id::coerce_event_id;
use crate::filter_spec::FilterSpec;
use crate::path::resolve;
use crate::projection::project;

/// Why a record was left out of the results
#[derive(Debug, Error)]
enum Skip {
    #[error("record has no payload")]
    NoPayload,
    #[error("keyword filter rejected the payload")]
    Keywords,
    #[error("payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("event id {0:?} not wanted")]
    EventId(Option<i64>),
    #[error("record carries no usable timestamp")]
    NoTimestamp,
    #[error("record time is outside the requested range")]
    OutOfRange,
}

/// Lazy filter over a stream of decoded records.
///
/// Pulls one record per call to `next`, runs the cheap text filter before
/// parsing, and stops once either the scan limit or the result limit is hit.
/// A decoder error ends the stream; everything yielded before it stands.
pub struct EventFilter<I> {
    /// Upstream records in arrival order
    records: I,

    spec: FilterSpec,

    /// Records pulled from the source
    scanned: usize,

    /// Records yielded to the caller
    returned: usize,

    /// Set once the source is exhausted or failed
    finished: bool,
}

impl<I, E> EventFilter<I>
where
    I: Iterator<Item = Result<RawRecord, E>>,
    E: Display,
{
    pub fn new(records: I, spec: FilterSpec) -> Self {
        Self {
            records,
            spec,
            scanned: 0,
            returned: 0,
            finished: false,
        }
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn scanned(&self) -> usize {
        self.scanned
    }

    pub fn returned(&self) -> usize {
        self.returned
    }

    fn limits_reached(&self) -> bool {
        self.scanned >= self.spec.scan_limit() || self.returned >= self.spec.results_limit()
    }

    fn evaluate(&self, record: RawRecord) -> Result<Value, Skip> {
        let RawRecord { data, timestamp } = record;
        let data = data.filter(|d| !d.is_empty()).ok_or(Skip::NoPayload)?;

        let keywords = self.spec.keywords();
        if !keywords.is_empty() && !keywords.matches(&data.to_lowercase()) {
            return Err(Skip::Keywords);
        }

        let event: Value = serde_json::from_str(&data)?;

        let event_id = resolve(&event, EVENT_ID_PATH).and_then(coerce_event_id);
        if !self.spec.wants_event_id(event_id) {
            return Err(Skip::EventId(event_id));
        }

        // Prefer the record's own SystemTime over the decoder's scan timestamp
        let time = resolve(&event, SYSTEM_TIME_PATH)
            .and_then(|node| normalize_timestamp(&Param::from(node.clone()), None))
            .or_else(|| normalize_timestamp(&timestamp, None))
            .ok_or(Skip::NoTimestamp)?;
        if !self.spec.contains_time(time) {
            return Err(Skip::OutOfRange);
        }

        Ok(match self.spec.fields() {
            Some(fields) => Value::Object(project(&event, fields)),
            None => event,
        })
    }
}

impl<I, E> Iterator for EventFilter<I>
where
    I: Iterator<Item = Result<RawRecord, E>>,
    E: Display,
{
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        loop {
            if self.finished || self.limits_reached() {
                return None;
            }

            let record = match self.records.next() {
                Some(Ok(record)) => record,
                Some(Err(err)) => {
                    // Partial output is still a valid answer
                    tracing::debug!(scanned = self.scanned, error = %err, "record stream aborted");
                    self.finished = true;
                    return None;
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };

            self.scanned += 1;

            match self.evaluate(record) {
                Ok(event) => {
                    self.returned += 1;
                    return Some(event);
                }
                Err(skip) => {
                    tracing::trace!(scanned = self.scanned, reason = %skip, "record skipped");
                }
            }
        }
    }
}
