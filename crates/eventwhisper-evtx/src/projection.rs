use eventwhisper_types::{EVENT_ENVELOPE_KEY, ProjectedEvent};
use serde_json::Value;

use crate::path::resolve;

/// Project a decoded record onto the requested dotted paths.
///
/// Each path is resolved from the record root first, then relative to the
/// `Event` envelope so callers may omit the `Event.` prefix. The result has
/// exactly one entry per path, in request order; unresolved paths map to null.
pub fn project(event: &Value, fields: &[String]) -> ProjectedEvent {
    let envelope = event.get(EVENT_ENVELOPE_KEY);

    fields
        .iter()
        .map(|field| {
            let value = resolve_present(event, field)
                .or_else(|| envelope.and_then(|root| resolve_present(root, field)))
                .cloned()
                .unwrap_or(Value::Null);
            (field.clone(), value)
        })
        .collect()
}

fn resolve_present<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    resolve(root, path).filter(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn sample() -> Value {
        json!({
            "Event": {
                "System": {
                    "EventID": 1,
                    "Channel": "Microsoft-Windows-Sysmon/Operational",
                    "TimeCreated": {"#attributes": {"SystemTime": "2019-07-19T15:11:16.487990Z"}}
                },
                "EventData": {"Image": "C:\\Windows\\System32\\cmd.exe", "User": null}
            }
        })
    }

    #[test]
    fn test_projection_keeps_order_and_keys() {
        let projected = project(
            &sample(),
            &fields(&[
                "Event.System.TimeCreated.#attributes.SystemTime",
                "Event.EventData.Missing",
                "Event.System.Channel",
            ]),
        );

        let keys: Vec<&str> = projected.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "Event.System.TimeCreated.#attributes.SystemTime",
                "Event.EventData.Missing",
                "Event.System.Channel",
            ]
        );
        assert_eq!(projected["Event.EventData.Missing"], Value::Null);
        assert_eq!(
            projected["Event.System.Channel"],
            json!("Microsoft-Windows-Sysmon/Operational")
        );
    }

    #[test]
    fn test_envelope_fallback() {
        let projected = project(&sample(), &fields(&["System.EventID", "EventData.Image"]));
        assert_eq!(projected["System.EventID"], json!(1));
        assert_eq!(projected["EventData.Image"], json!("C:\\Windows\\System32\\cmd.exe"));
    }

    #[test]
    fn test_explicit_null_stays_null() {
        let projected = project(&sample(), &fields(&["Event.EventData.User"]));
        assert_eq!(projected.len(), 1);
        assert_eq!(projected["Event.EventData.User"], Value::Null);
    }

    #[test]
    fn test_non_object_root() {
        let projected = project(&json!([1, 2]), &fields(&["0", "Event"]));
        assert_eq!(projected["0"], json!(1));
        assert_eq!(projected["Event"], Value::Null);
    }
}
