use serde_json::Value;

/// Resolve a dotted path such as `Event.EventData.Data.0` inside a decoded record.
///
/// Object segments are looked up by key, array segments must be all-digit
/// in-bounds indices. Any mismatch yields `None`; a missing path is not an error.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => parse_index(segment).and_then(|idx| items.get(idx)),
        _ => None,
    })
}

fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
