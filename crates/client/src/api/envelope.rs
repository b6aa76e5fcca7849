//! Response envelope normalisation.
//!
//! List endpoints answer with either a bare array or an object wrapping the
//! array. Keys are tried in this fixed order, and the first one holding an
//! array wins: `results`, `items`, `data`, `members`, `colaboradores`.
//! Anything else is an empty list.

use serde_json::Value;

pub const LIST_KEYS: &[&str] = &["results", "items", "data", "members", "colaboradores"];

pub fn extract_list(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Single-record lookups answer with an array (first entry), an object
/// wrapping the record under `result` or `data`, or the record itself.
pub fn extract_single(payload: Value) -> Option<Value> {
    match payload {
        Value::Null => None,
        Value::Array(items) => items.into_iter().next().filter(|v| !v.is_null()),
        Value::Object(mut map) => {
            for key in ["result", "data"] {
                if let Some(inner) = map.remove(key) {
                    if inner.is_object() {
                        return Some(inner);
                    }
                    map.insert(key.to_string(), inner);
                }
            }
            Some(Value::Object(map))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_list_shape_is_understood() {
        assert_eq!(extract_list(json!([1, 2])).len(), 2);
        assert_eq!(extract_list(json!({ "results": [1] })).len(), 1);
        assert_eq!(extract_list(json!({ "items": [1, 2, 3] })).len(), 3);
        assert_eq!(extract_list(json!({ "data": [1] })).len(), 1);
        assert_eq!(extract_list(json!({ "members": [1, 2] })).len(), 2);
        assert_eq!(extract_list(json!({ "colaboradores": [1] })).len(), 1);
        assert!(extract_list(json!({ "total": 0 })).is_empty());
        assert!(extract_list(Value::Null).is_empty());
    }

    #[test]
    fn list_key_priority_is_fixed() {
        let payload = json!({ "data": ["d"], "results": ["r"], "items": "not a list" });
        assert_eq!(extract_list(payload), vec![json!("r")]);
        let payload = json!({ "results": null, "items": ["i"] });
        assert_eq!(extract_list(payload), vec![json!("i")]);
    }

    #[test]
    fn single_record_shapes() {
        assert_eq!(extract_single(json!([])), None);
        assert_eq!(extract_single(json!([{ "id": 1 }])), Some(json!({ "id": 1 })));
        assert_eq!(
            extract_single(json!({ "result": { "id": 2 } })),
            Some(json!({ "id": 2 }))
        );
        assert_eq!(
            extract_single(json!({ "data": { "id": 3 } })),
            Some(json!({ "id": 3 }))
        );
        assert_eq!(
            extract_single(json!({ "id": 4, "data": "x" })),
            Some(json!({ "id": 4, "data": "x" }))
        );
        assert_eq!(extract_single(Value::Null), None);
    }
}
