/*!
# Report Aggregator

Post-processes the fingerprint table into filtered, sorted and annotated
duplicate records, classifies the leaf-object subset and derives the
summary size statistics.
*/

use serde::Serialize;
use serde_json::Value;

use super::fingerprint::serialized_size;
use super::walker::{DuplicateEntry, FingerprintTable};

/// Sighting count a fingerprint must exceed (strictly) to be reported.
pub const DUPLICATE_COUNT_THRESHOLD: usize = 5;

/// One reportable duplicate with derived size statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRecord {
    pub count: usize,
    pub occurrences: Vec<String>,
    pub last_path: Vec<String>,
    pub item: Value,
    /// Serialized size of one copy times the sighting count.
    pub size_in_bytes: usize,
    /// Share of the file size taken by this duplicate, two decimals.
    pub percentage: String,
}

impl DuplicateRecord {
    /// Path of the most recent sighting joined with `.`.
    pub fn last_path_joined(&self) -> String {
        self.last_path.join(".")
    }

    /// Compact item JSON truncated to `limit` characters.
    pub fn item_preview(&self, limit: usize) -> String {
        self.item.to_string().chars().take(limit).collect()
    }
}

/// Filters the table to entries sighted more than `threshold` times and
/// annotates the survivors with size and percentage statistics.
///
/// Survivors are sorted by descending count; the sort is stable, so entries
/// with equal counts keep their first-sighting order.
pub fn aggregate(
    table: &FingerprintTable,
    file_size_in_bytes: u64,
    threshold: usize,
) -> Vec<DuplicateRecord> {
    let mut survivors: Vec<&DuplicateEntry> = table
        .entries()
        .iter()
        .filter(|entry| entry.count > threshold)
        .collect();
    survivors.sort_by(|a, b| b.count.cmp(&a.count));

    survivors
        .into_iter()
        .map(|entry| {
            let size_in_bytes = serialized_size(&entry.item) * entry.count;
            DuplicateRecord {
                count: entry.count,
                occurrences: entry.occurrences.iter().cloned().collect(),
                last_path: entry.path.clone(),
                item: entry.item.clone(),
                size_in_bytes,
                percentage: percent_of(size_in_bytes as f64, file_size_in_bytes),
            }
        })
        .collect()
}

/// Whether `value` is a plain object: a mapping whose direct values are all
/// primitives or lists of primitives.
///
/// Empty lists qualify; a nested mapping or a list containing one
/// disqualifies. Plain objects cannot contain further duplicatable
/// structure, so the leaf subset avoids double-counting parents against
/// their children.
pub fn is_plain_object(value: &Value) -> bool {
    let Value::Object(map) = value else {
        return false;
    };
    map.values().all(|child| match child {
        Value::Object(_) => false,
        Value::Array(items) => items.iter().all(|item| !item.is_object() && !item.is_array()),
        _ => true,
    })
}

/// The subset of `records` whose item is a plain object.
pub fn leaf_records(records: &[DuplicateRecord]) -> Vec<&DuplicateRecord> {
    records
        .iter()
        .filter(|record| is_plain_object(&record.item))
        .collect()
}

/// Aggregate statistics over the filtered records and their leaf subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub file_size_in_bytes: u64,
    /// Sum of counts over all filtered records. Overestimates independent
    /// duplicates: parent containers and their duplicated children are both
    /// counted.
    pub total_duplicates: usize,
    /// Sum of counts over the leaf subset.
    pub total_leaf_duplicates: usize,
    /// Number of unique leaf fingerprints.
    pub unique_leaf_count: usize,
    /// Bytes currently taken by all copies of the leaf duplicates.
    pub total_leaf_size_in_bytes: usize,
    /// Bytes needed to keep exactly one copy per unique leaf fingerprint.
    pub potential_leaf_size_in_bytes: usize,
    /// `file_size - (total_leaf_size + potential_leaf_size)`; negative when
    /// the leaf duplicates dominate the file.
    pub potential_reduction_bytes: i64,
    /// `(total_leaf_size - potential_leaf_size) / file_size`, two decimals.
    pub potential_reduction_percent: String,
    /// Share of the file currently taken by leaf duplicates, two decimals.
    pub leaf_share_percent: String,
}

/// Derives the summary statistics for `records` against the file size.
pub fn summarize(records: &[DuplicateRecord], file_size_in_bytes: u64) -> SummaryStats {
    let leaves = leaf_records(records);

    let total_duplicates: usize = records.iter().map(|record| record.count).sum();
    let total_leaf_duplicates: usize = leaves.iter().map(|record| record.count).sum();
    let total_leaf_size_in_bytes: usize = leaves.iter().map(|record| record.size_in_bytes).sum();
    let potential_leaf_size_in_bytes: usize = leaves
        .iter()
        .map(|record| serialized_size(&record.item))
        .sum();

    let potential_reduction_bytes = file_size_in_bytes as i64
        - (total_leaf_size_in_bytes + potential_leaf_size_in_bytes) as i64;

    SummaryStats {
        file_size_in_bytes,
        total_duplicates,
        total_leaf_duplicates,
        unique_leaf_count: leaves.len(),
        total_leaf_size_in_bytes,
        potential_leaf_size_in_bytes,
        potential_reduction_bytes,
        potential_reduction_percent: percent_of(
            total_leaf_size_in_bytes as f64 - potential_leaf_size_in_bytes as f64,
            file_size_in_bytes,
        ),
        leaf_share_percent: percent_of(total_leaf_size_in_bytes as f64, file_size_in_bytes),
    }
}

/// Formats `part / file_size * 100` with two decimals. Empty files report
/// `0.00` instead of dividing by zero.
fn percent_of(part: f64, file_size_in_bytes: u64) -> String {
    if file_size_in_bytes == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", part / file_size_in_bytes as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::walker::walk_document;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn table_for(document: &Value) -> FingerprintTable {
        let mut table = FingerprintTable::new();
        walk_document(document, &mut table);
        table
    }

    fn repeated_users(copies: usize) -> Value {
        let user = json!({"id": 1, "name": "x"});
        json!({ "users": vec![user; copies] })
    }

    #[test]
    fn test_threshold_is_strictly_greater() {
        let at_threshold = table_for(&repeated_users(5));
        assert!(aggregate(&at_threshold, 1200, DUPLICATE_COUNT_THRESHOLD).is_empty());

        let above_threshold = table_for(&repeated_users(6));
        let records = aggregate(&above_threshold, 1200, DUPLICATE_COUNT_THRESHOLD);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].count, 6);
    }

    #[test]
    fn test_threshold_zero_surfaces_single_sightings() {
        let table = table_for(&json!({"meta": {"total": 1}}));
        assert!(aggregate(&table, 100, DUPLICATE_COUNT_THRESHOLD).is_empty());
        let records = aggregate(&table, 100, 0);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].count, 1);
    }

    #[test]
    fn test_size_and_percentage_arithmetic() {
        // {"id":10,"name":"x"} serializes to 20 bytes; 6 copies in a
        // 1200-byte file take 120 bytes, 10 percent.
        let user = json!({"id": 10, "name": "x"});
        let table = table_for(&json!({ "users": vec![user; 6] }));
        let records = aggregate(&table, 1200, DUPLICATE_COUNT_THRESHOLD);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].size_in_bytes, 120);
        assert_eq!(records[0].percentage, "10.00");
    }

    #[test]
    fn test_zero_file_size_reports_zero_percent() {
        let table = table_for(&repeated_users(6));
        let records = aggregate(&table, 0, DUPLICATE_COUNT_THRESHOLD);
        assert_eq!(records[0].percentage, "0.00");

        let summary = summarize(&records, 0);
        assert_eq!(summary.potential_reduction_percent, "0.00");
        assert_eq!(summary.leaf_share_percent, "0.00");
    }

    #[test]
    fn test_sort_is_descending_and_stable_on_ties() {
        let a = json!({"kind": "a"});
        let b = json!({"kind": "b"});
        let c = json!({"kind": "c"});
        let document = json!({
            "first": vec![a; 6],
            "second": vec![b; 7],
            "third": vec![c; 6]
        });
        let records = aggregate(&table_for(&document), 1000, DUPLICATE_COUNT_THRESHOLD);

        let kinds: Vec<&str> = records
            .iter()
            .map(|record| record.item["kind"].as_str().unwrap())
            .collect();
        // Highest count first; the two count-6 entries keep sighting order.
        assert_eq!(kinds, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_leaf_classification() {
        assert!(is_plain_object(&json!({"a": [1, 2, 3]})));
        assert!(is_plain_object(&json!({"a": 1, "b": "x", "c": null})));
        assert!(is_plain_object(&json!({"a": []})));
        assert!(is_plain_object(&json!({"a": [null, 1, "x"]})));
        assert!(is_plain_object(&json!({})));

        assert!(!is_plain_object(&json!({"a": {"b": 1}})));
        assert!(!is_plain_object(&json!({"a": [{"b": 1}]})));
        assert!(!is_plain_object(&json!({"a": [[1]]})));
        assert!(!is_plain_object(&json!([1, 2])));
        assert!(!is_plain_object(&json!(1)));
    }

    #[test]
    fn test_leaf_subset_excludes_containers() {
        let user = json!({"id": 1, "name": "x"});
        let wrapper = json!({ "user": user });
        let document = json!({
            "flat": vec![user.clone(); 6],
            "wrapped": vec![wrapper; 6]
        });
        let records = aggregate(&table_for(&document), 5000, DUPLICATE_COUNT_THRESHOLD);
        let leaves = leaf_records(&records);

        // The wrapper objects duplicate too, but only the plain user object
        // is a leaf.
        assert_eq!(records.len(), 2);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].item, user);
    }

    #[test]
    fn test_summary_statistics() {
        // 12 sightings of a 19-byte leaf and 6 of a 28-byte container.
        let user = json!({"id": 1, "name": "x"});
        let wrapper = json!({ "user": user });
        let document = json!({
            "flat": vec![user.clone(); 6],
            "wrapped": vec![wrapper; 6]
        });
        let records = aggregate(&table_for(&document), 600, DUPLICATE_COUNT_THRESHOLD);
        let summary = summarize(&records, 600);

        assert_eq!(summary.total_duplicates, 18);
        assert_eq!(summary.total_leaf_duplicates, 12);
        assert_eq!(summary.unique_leaf_count, 1);
        assert_eq!(summary.total_leaf_size_in_bytes, 228);
        assert_eq!(summary.potential_leaf_size_in_bytes, 19);
        assert_eq!(summary.potential_reduction_bytes, 600 - 247);
        assert_eq!(summary.potential_reduction_percent, "34.83");
        assert_eq!(summary.leaf_share_percent, "38.00");
    }

    #[test]
    fn test_negative_potential_reduction() {
        let table = table_for(&repeated_users(6));
        let records = aggregate(&table, 10, DUPLICATE_COUNT_THRESHOLD);
        let summary = summarize(&records, 10);
        // 6 * 19 + 19 = 133 bytes of leaf data against a 10-byte file size.
        assert_eq!(summary.potential_reduction_bytes, 10 - 133);
    }
}
