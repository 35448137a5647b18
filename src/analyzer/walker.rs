/*!
# Fingerprint Walker

Depth-first traversal over a decoded JSON document. Every composite node
(mapping or list) is fingerprinted and recorded in a [`FingerprintTable`];
primitives are skipped. Because parents are recorded before their children,
a duplicated container and its duplicated children are both counted, which
overestimates independent duplicates. The aggregator compensates with its
leaf-only subset.
*/

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;

use super::fingerprint::fingerprint;

/// Aggregated sightings of a single fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateEntry {
    /// Number of tree positions whose canonical form matched this fingerprint.
    pub count: usize,
    /// Labels under which the fingerprint was seen, duplicates collapsed.
    pub occurrences: BTreeSet<String>,
    /// The value captured at the first sighting.
    pub item: Value,
    /// Path of the most recent sighting. Empty until a second sighting occurs.
    pub path: Vec<String>,
}

/// Mapping of fingerprint to duplicate entry.
///
/// Iteration yields entries in first-sighting order, which keeps downstream
/// sorting and tie-breaking deterministic across runs.
#[derive(Debug, Default)]
pub struct FingerprintTable {
    entries: Vec<DuplicateEntry>,
    index: HashMap<i32, usize>,
}

impl FingerprintTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sighting of `value` under `label` at `path`.
    ///
    /// The first sighting stores the value itself and an empty path; every
    /// later sighting bumps the count, extends the occurrence set and
    /// overwrites the stored path with the current one. The first-seen
    /// `item` is never replaced.
    pub fn record(&mut self, fingerprint: i32, label: &str, path: &[String], value: &Value) {
        match self.index.get(&fingerprint) {
            Some(&slot) => {
                let entry = &mut self.entries[slot];
                entry.count += 1;
                entry.occurrences.insert(label.to_string());
                entry.path = path.to_vec();
            }
            None => {
                let mut occurrences = BTreeSet::new();
                occurrences.insert(label.to_string());
                self.index.insert(fingerprint, self.entries.len());
                self.entries.push(DuplicateEntry {
                    count: 1,
                    occurrences,
                    item: value.clone(),
                    path: Vec::new(),
                });
            }
        }
    }

    /// Entries in first-sighting order.
    pub fn entries(&self) -> &[DuplicateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Visits `value`, reached under `label` at `path`, and recurses into its
/// children.
///
/// `path` holds the ancestor labels leading to `value`, including its own
/// label as the last element. List children are labeled with their
/// bracketed index token (`[0]`, `[1]`, ...). A mapping child stored under
/// the literal key `"0"` is treated as if it were the element at index 0 of
/// an array-like container and is visited with the parent's label and path
/// unchanged.
pub fn walk(value: &Value, label: &str, path: &[String], table: &mut FingerprintTable) {
    match value {
        // Primitives have no children and are never fingerprinted.
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        Value::Array(items) => {
            table.record(fingerprint(value), label, path, value);
            for (index, item) in items.iter().enumerate() {
                let item_label = format!("[{}]", index);
                let mut item_path = path.to_vec();
                item_path.push(item_label.clone());
                walk(item, &item_label, &item_path, table);
            }
        }
        Value::Object(map) => {
            table.record(fingerprint(value), label, path, value);
            for (key, child) in map {
                if key == "0" {
                    walk(child, label, path, table);
                } else {
                    let mut child_path = path.to_vec();
                    child_path.push(key.clone());
                    walk(child, key, &child_path, table);
                }
            }
        }
    }
}

/// Walks a top-level document mapping, once per top-level key.
///
/// Documents that decode to anything other than a mapping (including
/// `null`) have nothing to analyze and leave the table untouched.
pub fn walk_document(document: &Value, table: &mut FingerprintTable) {
    if let Value::Object(map) = document {
        for (key, value) in map {
            walk(value, key, &[key.clone()], table);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn walk_fixture(document: &Value) -> FingerprintTable {
        let mut table = FingerprintTable::new();
        walk_document(document, &mut table);
        table
    }

    #[test]
    fn test_primitive_only_document_records_nothing() {
        let table = walk_fixture(&json!({"a": 1, "b": "x", "c": null, "d": true}));
        assert!(table.is_empty());
    }

    #[test]
    fn test_counts_structurally_identical_objects() {
        let table = walk_fixture(&json!({
            "first": {"id": 1, "name": "x"},
            "second": {"id": 1, "name": "x"},
            "third": {"id": 2, "name": "y"}
        }));

        // Two distinct fingerprints among the three objects.
        assert_eq!(table.len(), 2);
        let duplicated = &table.entries()[0];
        assert_eq!(duplicated.count, 2);
        let labels: Vec<&str> = duplicated.occurrences.iter().map(String::as_str).collect();
        assert_eq!(labels, vec!["first", "second"]);
    }

    #[test]
    fn test_key_order_differences_share_a_fingerprint() {
        let document: Value =
            serde_json::from_str(r#"{"first": {"a": 1, "b": 2}, "second": {"b": 2, "a": 1}}"#)
                .unwrap();
        let table = walk_fixture(&document);

        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].count, 2);
        // The stored item is the first-seen instance, original key order intact.
        assert_eq!(table.entries()[0].item.to_string(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_first_sighting_path_is_empty_and_later_paths_overwrite() {
        let table = walk_fixture(&json!({
            "solo": {"k": 1},
            "pair": {"left": {"v": 9}, "right": {"v": 9}}
        }));

        let solo = table
            .entries()
            .iter()
            .find(|entry| entry.item == json!({"k": 1}))
            .unwrap();
        assert_eq!(solo.count, 1);
        assert!(solo.path.is_empty());

        let pair = table
            .entries()
            .iter()
            .find(|entry| entry.item == json!({"v": 9}))
            .unwrap();
        assert_eq!(pair.count, 2);
        // Path tracks the most recent sighting, not the first.
        assert_eq!(pair.path, vec!["pair", "right"]);
    }

    #[test]
    fn test_array_children_get_bracketed_index_labels() {
        let table = walk_fixture(&json!({
            "users": [{"id": 1}, {"id": 1}]
        }));

        let users = table
            .entries()
            .iter()
            .find(|entry| entry.item == json!({"id": 1}))
            .unwrap();
        assert_eq!(users.count, 2);
        let labels: Vec<&str> = users.occurrences.iter().map(String::as_str).collect();
        assert_eq!(labels, vec!["[0]", "[1]"]);
        assert_eq!(users.path, vec!["users", "[1]"]);
    }

    #[test]
    fn test_mapping_key_zero_keeps_parent_label_and_path() {
        let table = walk_fixture(&json!({
            "wrapper": {"0": {"inner": 1}}
        }));

        let inner = table
            .entries()
            .iter()
            .find(|entry| entry.item == json!({"inner": 1}))
            .unwrap();
        // Seen under the parent's own label, with no extra path segment.
        assert!(inner.occurrences.contains("wrapper"));
        assert_eq!(inner.count, 1);

        let wrapper = table
            .entries()
            .iter()
            .find(|entry| entry.item == json!({"0": {"inner": 1}}))
            .unwrap();
        assert_eq!(wrapper.count, 1);
    }

    #[test]
    fn test_parent_and_children_are_both_counted() {
        // The containing array repeats twice, and so does each element; the
        // element count includes the sightings inside both array copies.
        let table = walk_fixture(&json!({
            "a": [{"x": 1}, {"x": 1}],
            "b": [{"x": 1}, {"x": 1}]
        }));

        let arrays = table
            .entries()
            .iter()
            .find(|entry| entry.item.is_array())
            .unwrap();
        assert_eq!(arrays.count, 2);

        let elements = table
            .entries()
            .iter()
            .find(|entry| entry.item == json!({"x": 1}))
            .unwrap();
        assert_eq!(elements.count, 4);
    }

    #[test]
    fn test_non_mapping_documents_are_skipped() {
        assert!(walk_fixture(&json!(null)).is_empty());
        assert!(walk_fixture(&json!([1, 2, 3])).is_empty());
        assert!(walk_fixture(&json!("text")).is_empty());
    }

    #[test]
    fn test_walk_is_deterministic() {
        let document = json!({
            "users": [{"id": 1, "name": "x"}, {"id": 1, "name": "x"}],
            "meta": {"total": 2}
        });
        let first = walk_fixture(&document);
        let second = walk_fixture(&document);
        assert_eq!(first.entries(), second.entries());
    }
}
