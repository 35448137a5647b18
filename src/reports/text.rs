/*!
# Text Reporter

Console report: run header, the duplicate table, the leaf-only table and
the size/reduction summary. Output is ANSI-colored when the terminal
supports it and plain otherwise, so the same report works in CI logs.
*/

use anyhow::Result;

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::analyzer::DuplicateRecord;
use crate::core::AnalysisResults;

/// Characters of the item JSON kept in table previews.
const ITEM_PREVIEW_CHARS: usize = 40;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// ANSI color codes.
struct Colors;

impl Colors {
    const RESET: &'static str = "\x1b[0m";
    const BOLD: &'static str = "\x1b[1m";
    const CYAN: &'static str = "\x1b[36m";
    const GREEN: &'static str = "\x1b[32m";
    const YELLOW: &'static str = "\x1b[33m";
    const GRAY: &'static str = "\x1b[90m";
}

/// Checks terminal color support from the environment.
pub fn supports_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    match std::env::var("TERM") {
        Ok(term) => !term.is_empty() && term != "dumb",
        Err(_) => false,
    }
}

/// Text reporter for console output.
pub struct TextReporter;

impl TextReporter {
    pub fn new() -> Self {
        Self
    }

    fn paint(&self, config: &ReportConfig, color: &str, text: &str) -> String {
        if config.use_colors {
            format!("{}{}{}", color, text, Colors::RESET)
        } else {
            text.to_string()
        }
    }

    fn section(&self, config: &ReportConfig, title: &str) -> String {
        self.paint(
            config,
            Colors::BOLD,
            &format!("=== {} ===", title),
        )
    }

    fn render_header(&self, results: &AnalysisResults, config: &ReportConfig, out: &mut Vec<String>) {
        let metadata = results.metadata();
        out.push(self.section(config, "JSON Duplicate Analysis"));
        if let Some(path) = &metadata.source_path {
            out.push(format!("Source:    {}", path.display()));
        }
        out.push(format!(
            "File size: {} B / {:.2} MB",
            metadata.file_size_in_bytes,
            metadata.file_size_in_bytes as f64 / BYTES_PER_MEGABYTE
        ));
        out.push(format!("Started:   {}", metadata.started_at.to_rfc3339()));
        out.push(format!("Finished:  {}", metadata.finished_at.to_rfc3339()));
    }

    fn records_table(&self, records: &[&DuplicateRecord]) -> String {
        let headers = [
            "count",
            "occurrences",
            "lastPath",
            "itemPreview",
            "sizeInBytes",
            "percentage",
        ];
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| {
                vec![
                    record.count.to_string(),
                    record.occurrences.join(" | "),
                    record.last_path_joined(),
                    record.item_preview(ITEM_PREVIEW_CHARS),
                    record.size_in_bytes.to_string(),
                    record.percentage.clone(),
                ]
            })
            .collect();
        render_table(&headers, &rows)
    }

    fn render_summary(&self, results: &AnalysisResults, config: &ReportConfig, out: &mut Vec<String>) {
        let summary = results.summary();

        out.push(String::new());
        out.push(format!(
            "TOTAL DUPLICATED OBJECTS: {} {}",
            summary.total_duplicates,
            self.paint(
                config,
                Colors::GRAY,
                "(overestimate: parent containers and their duplicated children are both counted)",
            )
        ));

        if !config.include_leaf_tables {
            return;
        }

        out.push(String::new());
        out.push(self.section(config, "Leaf object duplicates"));
        let leaves = results.leaf_records();
        if leaves.is_empty() {
            out.push(self.paint(config, Colors::GRAY, "No leaf duplicates above the threshold."));
        } else {
            out.push(self.records_table(&leaves));
        }

        out.push(String::new());
        out.push(self.section(config, "Current vs optimized"));
        let optimized_rows = vec![
            vec![
                "currentCount".to_string(),
                format!("{} items", summary.total_leaf_duplicates),
            ],
            vec![
                "potentialCount".to_string(),
                format!("{} items", summary.unique_leaf_count),
            ],
            vec![
                "currentLeafObjectsSize".to_string(),
                format!("{} Bytes", summary.total_leaf_size_in_bytes),
            ],
            vec![
                "potentialLeafObjectsSize".to_string(),
                format!("{} Bytes", summary.potential_leaf_size_in_bytes),
            ],
            vec![
                "potentialSizeReduction".to_string(),
                format!("{} Bytes", summary.potential_reduction_bytes),
            ],
            vec![
                "potentialFileSizeReductionPercent".to_string(),
                format!("{}%", summary.potential_reduction_percent),
            ],
        ];
        out.push(render_table(&["metric", "value"], &optimized_rows));

        out.push(String::new());
        out.push(format!(
            "Current leaf object count is {} items (leaf objects with duplicates)",
            summary.total_leaf_duplicates
        ));
        out.push(format!("...of which {} are unique.", summary.unique_leaf_count));
        out.push(String::new());
        out.push(format!(
            "Current leaf objects size: {} B / {:.2} MB",
            summary.total_leaf_size_in_bytes,
            summary.total_leaf_size_in_bytes as f64 / BYTES_PER_MEGABYTE
        ));
        out.push(format!(
            "Total file size: {} B / {:.2} MB",
            summary.file_size_in_bytes,
            summary.file_size_in_bytes as f64 / BYTES_PER_MEGABYTE
        ));
        out.push(format!(
            "Leaf objects with duplicates take up {} of the file size.",
            self.paint(
                config,
                Colors::YELLOW,
                &format!("{}%", summary.leaf_share_percent)
            )
        ));
        out.push(String::new());
        out.push(format!(
            "The file size can be reduced by up to {} if all duplicates are removed.",
            self.paint(
                config,
                Colors::GREEN,
                &format!("{}%", summary.potential_reduction_percent)
            )
        ));
    }
}

impl ReportGenerator for TextReporter {
    fn generate_report(&self, results: &AnalysisResults, config: &ReportConfig) -> Result<String> {
        let mut out = Vec::new();

        self.render_header(results, config, &mut out);

        out.push(String::new());
        out.push(self.section(config, "Duplicates"));
        if results.is_empty() {
            out.push(self.paint(
                config,
                Colors::CYAN,
                "No duplicate structures above the threshold.",
            ));
        } else {
            let records: Vec<&DuplicateRecord> = results.records().iter().collect();
            out.push(self.records_table(&records));
        }

        self.render_summary(results, config, &mut out);

        out.push(String::new());
        Ok(out.join("\n"))
    }

    fn supported_format() -> ReportFormat {
        ReportFormat::Text
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a fixed-width table with a header row and a separator line.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx < widths.len() {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| format!("{:<width$}", cell, width = widths[idx]))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers.iter().map(|h| h.to_string()).collect()));
    lines.push(format!(
        "|{}|",
        widths
            .iter()
            .map(|width| "-".repeat(width + 2))
            .collect::<Vec<_>>()
            .join("|")
    ));
    for row in rows {
        lines.push(render_row(row.clone()));
    }
    lines.join("\n")
}
