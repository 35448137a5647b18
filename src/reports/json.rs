/*!
# JSON Reporter

Machine-readable report: one entry per surviving duplicate with its count,
occurrence labels, last-seen path and the raw duplicated value.
*/

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::core::AnalysisResults;

/// One duplicate in the machine-readable report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReportEntry {
    pub count: usize,
    pub occurrences: Vec<String>,
    /// Last-seen path segments joined with `.`.
    pub last_path: String,
    /// The raw duplicated value.
    pub item: Value,
}

/// JSON reporter for API and tooling integration.
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    /// Builds the report entries without serializing them.
    pub fn entries(results: &AnalysisResults) -> Vec<JsonReportEntry> {
        results
            .records()
            .iter()
            .map(|record| JsonReportEntry {
                count: record.count,
                occurrences: record.occurrences.clone(),
                last_path: record.last_path_joined(),
                item: record.item.clone(),
            })
            .collect()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_report(&self, results: &AnalysisResults, _config: &ReportConfig) -> Result<String> {
        Ok(serde_json::to_string(&Self::entries(results))?)
    }

    fn supported_format() -> ReportFormat {
        ReportFormat::Json
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
