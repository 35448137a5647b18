/*!
# CSV Reporter

Flattens the duplicate records into a comma-separated table for
spreadsheet review. Each record becomes one row with a `count`,
`occurrences`, `lastPath` and `itemPreview` column; the flattener itself
is generic over arbitrary row objects and derives columns from dot-joined
key paths.
*/

use std::collections::HashMap;

use anyhow::Result;
use serde_json::{json, Value};

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::core::AnalysisResults;

/// Characters of the item JSON kept in the preview column.
const ITEM_PREVIEW_CHARS: usize = 60;

/// Column layout discovered while flattening rows.
///
/// Column order is first-seen order across all rows; rows missing a column
/// leave the cell empty.
#[derive(Debug, Default)]
struct ColumnSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnSet {
    fn index_of(&mut self, name: &str) -> usize {
        match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.names.len();
                self.names.push(name.to_string());
                self.index.insert(name.to_string(), idx);
                idx
            }
        }
    }
}

/// Flattens `value` into `row` cells addressed by dot-joined column paths.
///
/// Mappings recurse with their key appended to the path. A value under the
/// literal key `"0"`, and the first element of a list, flatten into the
/// parent's own column path (array-like values collapse onto their
/// container's column); later list elements get their index as a path
/// segment.
fn set_value(
    row: &mut Vec<Option<String>>,
    columns: &mut ColumnSet,
    path: &[String],
    value: &Value,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "0" {
                    set_value(row, columns, path, child);
                } else {
                    let mut child_path = path.to_vec();
                    child_path.push(key.clone());
                    set_value(row, columns, &child_path, child);
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if index == 0 {
                    set_value(row, columns, path, item);
                } else {
                    let mut item_path = path.to_vec();
                    item_path.push(index.to_string());
                    set_value(row, columns, &item_path, item);
                }
            }
        }
        primitive => {
            let idx = columns.index_of(&path.join("."));
            if row.len() <= idx {
                row.resize(idx + 1, None);
            }
            row[idx] = Some(render_cell(primitive));
        }
    }
}

/// Renders a primitive cell. Nulls become empty cells; strings are written
/// bare, without JSON quoting.
fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        _ => value.to_string(),
    }
}

/// Flattens `rows` into a header and one cell vector per row.
fn to_csv_format(rows: &[Value]) -> (Vec<String>, Vec<Vec<Option<String>>>) {
    let mut columns = ColumnSet::default();
    let mut data = Vec::with_capacity(rows.len());
    for row_value in rows {
        let mut row = Vec::new();
        set_value(&mut row, &mut columns, &[], row_value);
        data.push(row);
    }
    (columns.names, data)
}

/// Joins the header and rows into CSV text, padding short rows to the
/// header width.
fn to_csv_string(header: &[String], rows: &[Vec<Option<String>>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header.join(","));
    for row in rows {
        let mut cells: Vec<String> = row
            .iter()
            .map(|cell| cell.clone().unwrap_or_default())
            .collect();
        cells.resize(header.len(), String::new());
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

/// Softens the first comma of the item preview so the leading object keys
/// survive comma-separated parsing.
fn sanitize_preview(preview: &str) -> String {
    preview.replacen(',', ";", 1)
}

/// CSV reporter for table review of duplicate records.
pub struct CsvReporter;

impl CsvReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_report(&self, results: &AnalysisResults, _config: &ReportConfig) -> Result<String> {
        let rows: Vec<Value> = results
            .records()
            .iter()
            .map(|record| {
                json!({
                    "count": record.count,
                    "occurrences": record.occurrences.join(" | "),
                    "lastPath": record.last_path_joined(),
                    "itemPreview": sanitize_preview(&record.item_preview(ITEM_PREVIEW_CHARS)),
                })
            })
            .collect();

        let (header, data) = to_csv_format(&rows);
        Ok(to_csv_string(&header, &data))
    }

    fn supported_format() -> ReportFormat {
        ReportFormat::Csv
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}
