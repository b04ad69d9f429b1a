//! Shared helpers for the eventwhisper-evtx harnesses.
//!
//! Import via `mod common; use common::*;`. The synthetic corpus mimics the
//! JSON shape the EVTX decoder produces (`#attributes`, wrapped `EventID`).

#![allow(dead_code)]

use std::convert::Infallible;
use std::path::PathBuf;

use eventwhisper_evtx::{EventFilter, FilterRequest, FilterSpec, Limits, Param, RawRecord};
use serde_json::{Value, json};

pub const SYSTEM_TIME: &str = "Event.System.TimeCreated.#attributes.SystemTime";

/// Process images cycled through the synthetic corpus
pub const IMAGES: &[&str] = &[
    "C:\\Windows\\System32\\notepad.exe",
    "C:\\Windows\\System32\\lsass.exe",
    "C:\\Windows\\System32\\PING.EXE",
    "C:\\Windows\\System32\\WindowsPowerShell\\v1.0\\powershell.exe",
    "C:\\Windows\\System32\\services.exe",
    "C:\\Windows\\System32\\cmd.exe",
];

/// Event ids cycled through the synthetic corpus
pub const EVENT_IDS: &[i64] = &[1, 3, 5, 7, 10, 11, 12, 13, 19, 20, 21];

/// One Sysmon-shaped record; even ids are wrapped the way EVTX does it
pub fn sysmon_record(event_id: i64, system_time: &str, image: &str) -> RawRecord {
    let id = if event_id % 2 == 0 {
        json!({"#attributes": {"Qualifiers": 0}, "#text": event_id})
    } else {
        json!(event_id)
    };
    let payload = json!({
        "Event": {
            "#attributes": {"xmlns": "http://schemas.microsoft.com/win/2004/08/events/event"},
            "System": {
                "Provider": {"#attributes": {"Name": "Microsoft-Windows-Sysmon"}},
                "EventID": id,
                "TimeCreated": {"#attributes": {"SystemTime": system_time}},
                "Channel": "Microsoft-Windows-Sysmon/Operational"
            },
            "EventData": {"Image": image, "CommandLine": image}
        }
    });
    RawRecord::new(payload.to_string(), Param::Null)
}

/// `count` records, one minute apart from 2019-07-19T15:00:00Z
pub fn corpus(count: usize) -> Vec<RawRecord> {
    (0..count)
        .map(|i| {
            let time = format!(
                "2019-07-19T{:02}:{:02}:00.000000Z",
                15 + i / 60,
                i % 60
            );
            sysmon_record(EVENT_IDS[i % EVENT_IDS.len()], &time, IMAGES[i % IMAGES.len()])
        })
        .collect()
}

/// Normalize `request` with default limits and run it over `records`
pub fn run(records: Vec<RawRecord>, request: &FilterRequest) -> Vec<Value> {
    run_with_limits(records, request, &Limits::default())
}

pub fn run_with_limits(
    records: Vec<RawRecord>,
    request: &FilterRequest,
    limits: &Limits,
) -> Vec<Value> {
    let Some(spec) = FilterSpec::from_request(request, limits) else {
        return Vec::new();
    };
    EventFilter::new(records.into_iter().map(Ok::<_, Infallible>), spec).collect()
}

/// Location of the reference sample log, if present.
///
/// Honors `TEST_EVTX`, else `tests/data/test.evtx` in this crate.
pub fn sample_log() -> Option<PathBuf> {
    let path = std::env::var_os("TEST_EVTX")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/test.evtx"));
    path.is_file().then_some(path)
}
