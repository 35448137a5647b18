/*!
# Analysis Results

Containers for one analysis run: the surviving duplicate records, the
summary statistics and the run metadata. Reporters consume these to render
the JSON, CSV and console outputs.
*/

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzer::aggregator::{leaf_records, DuplicateRecord, SummaryStats};

/// Metadata of a single analysis run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// When parsing started.
    pub started_at: DateTime<Utc>,
    /// When aggregation finished.
    pub finished_at: DateTime<Utc>,
    /// Input file, when the run was file-backed.
    pub source_path: Option<PathBuf>,
    /// On-disk size of the input document.
    pub file_size_in_bytes: u64,
    /// Version of the analyzer that produced the results.
    pub analyzer_version: String,
}

/// Results of one analysis run.
///
/// Built once per run and owned by the call site; the fingerprint table it
/// was derived from is discarded after aggregation.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResults {
    records: Vec<DuplicateRecord>,
    summary: SummaryStats,
    metadata: AnalysisMetadata,
}

impl AnalysisResults {
    pub fn new(
        records: Vec<DuplicateRecord>,
        summary: SummaryStats,
        metadata: AnalysisMetadata,
    ) -> Self {
        Self {
            records,
            summary,
            metadata,
        }
    }

    /// Surviving duplicate records, highest count first.
    pub fn records(&self) -> &[DuplicateRecord] {
        &self.records
    }

    /// The subset of records whose item is a plain object.
    pub fn leaf_records(&self) -> Vec<&DuplicateRecord> {
        leaf_records(&self.records)
    }

    /// Summary statistics over the records and their leaf subset.
    pub fn summary(&self) -> &SummaryStats {
        &self.summary
    }

    /// Run metadata (timestamps, source, file size, version).
    pub fn metadata(&self) -> &AnalysisMetadata {
        &self.metadata
    }

    /// Number of surviving duplicate records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the run produced no reportable duplicates.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
