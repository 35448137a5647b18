/*!
# Fingerprinting

Canonical serialization and hashing for composite JSON values.

A fingerprint is a 32-bit digest of a value's canonical text form. The
canonical form sorts a mapping's direct keys so that two mappings with the
same content but different key insertion order collide to the same
fingerprint. Sorting is shallow: nested composites keep their document
order. Hash collisions between structurally different values are accepted,
the digest is a duplicate-detection key, not a cryptographic hash.
*/

use serde_json::{Map, Value};

/// Serializes a composite value to its canonical compact text form.
///
/// Mappings are written with their direct keys sorted lexicographically;
/// the values themselves, including nested composites, are serialized
/// unchanged in document order. Lists have no keys to sort and serialize
/// as-is.
pub fn canonical_form(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut pairs: Vec<(&String, &Value)> = map.iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));

            let mut sorted = Map::with_capacity(pairs.len());
            for (key, child) in pairs {
                sorted.insert(key.clone(), child.clone());
            }
            Value::Object(sorted).to_string()
        }
        _ => value.to_string(),
    }
}

/// 32-bit rolling hash over the UTF-16 code units of `text`.
///
/// `hash = hash * 31 + unit` with wrapping signed 32-bit arithmetic, so a
/// given text reduces to the same fingerprint on every run and platform.
pub fn simple_hash(text: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash
}

/// Computes the duplicate-detection fingerprint of a value.
pub fn fingerprint(value: &Value) -> i32 {
    simple_hash(&canonical_form(value))
}

/// Length in bytes of the compact serialized form of `value`.
pub fn serialized_size(value: &Value) -> usize {
    value.to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_simple_hash_known_value() {
        // h("abc") = ((0*31 + 'a')*31 + 'b')*31 + 'c'
        assert_eq!(simple_hash("abc"), 96354);
        assert_eq!(simple_hash(""), 0);
    }

    #[test]
    fn test_simple_hash_is_deterministic() {
        let long = "z".repeat(64);
        assert_eq!(simple_hash(&long), simple_hash(&long));
    }

    #[test]
    fn test_canonical_form_sorts_direct_keys() {
        let value = json!({"b": 2, "a": 1});
        assert_eq!(canonical_form(&value), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_canonical_form_keeps_nested_key_order() {
        let value: Value = serde_json::from_str(r#"{"b": {"z": 1, "y": 2}, "a": 1}"#).unwrap();
        assert_eq!(canonical_form(&value), r#"{"a":1,"b":{"z":1,"y":2}}"#);
    }

    #[test]
    fn test_canonical_form_serializes_lists_in_order() {
        let value = json!([3, 1, 2]);
        assert_eq!(canonical_form(&value), "[3,1,2]");
    }

    #[test]
    fn test_fingerprint_is_key_order_invariant() {
        let first: Value = serde_json::from_str(r#"{"a": 1, "b": 2}"#).unwrap();
        let second: Value = serde_json::from_str(r#"{"b": 2, "a": 1}"#).unwrap();
        assert_eq!(fingerprint(&first), fingerprint(&second));
    }

    #[test]
    fn test_fingerprint_distinguishes_content() {
        let first = json!({"a": 1});
        let second = json!({"a": 2});
        assert_ne!(fingerprint(&first), fingerprint(&second));
    }

    #[test]
    fn test_serialized_size_counts_compact_bytes() {
        assert_eq!(serialized_size(&json!({"id": 1, "name": "x"})), 19);
        assert_eq!(serialized_size(&json!([])), 2);
    }
}
