//! Canonical JSON encoding for deterministic serialization.
//!
//! The canonical form is the payload that gets signed, so the same record must
//! produce identical bytes everywhere:
//! - Object keys sorted by byte-wise comparison, at every depth
//! - No insignificant whitespace
//! - Array order preserved
//!
//! Key order is enforced here rather than relying on `serde_json`'s map type,
//! which changes iteration order when the `preserve_order` feature is enabled
//! anywhere in the dependency graph.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::vcon::Vcon;

/// Encode a record to canonical JSON.
pub fn canonical_json(vcon: &Vcon) -> Result<String> {
    canonical_json_of(vcon)
}

/// Encode a record to canonical JSON bytes.
pub fn canonical_bytes(vcon: &Vcon) -> Result<Vec<u8>> {
    canonical_json(vcon).map(String::into_bytes)
}

/// Encode any serializable value to canonical JSON.
pub fn canonical_json_of<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).map_err(|e| CoreError::Encoding(e.to_string()))?;
    serde_json::to_string(&canonicalize(value)).map_err(|e| CoreError::Encoding(e.to_string()))
}

/// Recursively rebuild a value with sorted object keys.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, value) in entries {
                sorted.insert(key, canonicalize(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::Party;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use serde_json::json;

    fn fixed_vcon() -> Vcon {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        Vcon::builder()
            .uuid("00000000-0000-4000-8000-000000000000")
            .version("0.0.1")
            .created_at(at)
            .updated_at(at)
            .party(Party::with_tel("+1"))
            .tag("b", "2")
            .tag("a", "1")
            .build()
    }

    #[test]
    fn test_canonical_deterministic() {
        let vcon = fixed_vcon();
        assert_eq!(canonical_json(&vcon).unwrap(), canonical_json(&vcon).unwrap());
    }

    #[test]
    fn test_canonical_exact_form() {
        let expected = concat!(
            r#"{"analysis":[],"attachments":[],"created_at":"2024-01-15T10:30:00Z","#,
            r#""dialog":[],"parties":[{"tel":"+1"}],"tags":{"a":"1","b":"2"},"#,
            r#""updated_at":"2024-01-15T10:30:00Z","#,
            r#""uuid":"00000000-0000-4000-8000-000000000000","vcon":"0.0.1"}"#,
        );
        assert_eq!(canonical_json(&fixed_vcon()).unwrap(), expected);
    }

    #[test]
    fn test_nested_keys_sorted() {
        let value = json!({"z": {"b": 1, "a": [{"d": 0, "c": 1}]}, "m": null});
        let encoded = serde_json::to_string(&canonicalize(value)).unwrap();
        assert_eq!(encoded, r#"{"m":null,"z":{"a":[{"c":1,"d":0}],"b":1}}"#);
    }

    #[test]
    fn test_key_order_independent() {
        let a: Value = serde_json::from_str(r#"{"x": 1, "y": {"q": 2, "p": 3}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y": {"p": 3, "q": 2}, "x": 1}"#).unwrap();
        assert_eq!(
            canonical_json_of(&a).unwrap(),
            canonical_json_of(&b).unwrap()
        );
    }

    #[test]
    fn test_canonical_parses_back() {
        let vcon = fixed_vcon();
        let parsed = Vcon::from_json(&canonical_json(&vcon).unwrap()).unwrap();
        assert_eq!(parsed, vcon);
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z0-9 ]{0,8}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::vec(("[a-zA-Z_]{1,6}", inner), 0..4)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonicalize_is_idempotent(value in json_value()) {
            let once = canonicalize(value);
            prop_assert_eq!(canonicalize(once.clone()), once);
        }

        #[test]
        fn canonical_form_ignores_insertion_order(
            entries in prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 0..8)
        ) {
            let forward: Map<String, Value> =
                entries.iter().map(|(k, v)| (k.clone(), Value::from(*v))).collect();
            let reverse: Map<String, Value> =
                entries.iter().rev().map(|(k, v)| (k.clone(), Value::from(*v))).collect();
            prop_assert_eq!(
                canonical_json_of(&Value::Object(forward)).unwrap(),
                canonical_json_of(&Value::Object(reverse)).unwrap()
            );
        }
    }
}
