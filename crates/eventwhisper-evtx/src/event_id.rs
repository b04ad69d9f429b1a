use serde_json::Value;

/// Keys under which decoders nest the id next to its attributes
const WRAPPER_KEYS: [&str; 3] = ["#text", "value", "Value"];

/// Coerce a decoded `EventID` node into an integer.
///
/// Handles `4624`, `"4624"` and `{"#attributes": {..}, "#text": 4624}`.
/// Only one wrapper level is unwrapped.
pub fn coerce_event_id(value: &Value) -> Option<i64> {
    coerce(value, true)
}

fn coerce(value: &Value, unwrap: bool) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) if unwrap => WRAPPER_KEYS
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(|inner| coerce(inner, false)),
        _ => None,
    }
}
