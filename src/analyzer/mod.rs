/*!
# Analyzer Module

Single-pass duplicate structure analysis: the fingerprint walker builds
the fingerprint table, the aggregator turns it into reportable records and
summary statistics.
*/

pub mod aggregator;
pub mod fingerprint;
pub mod walker;

pub use aggregator::{
    aggregate, is_plain_object, leaf_records, summarize, DuplicateRecord, SummaryStats,
    DUPLICATE_COUNT_THRESHOLD,
};
pub use fingerprint::{canonical_form, serialized_size, simple_hash};
pub use walker::{walk, walk_document, DuplicateEntry, FingerprintTable};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::core::{AnalysisMetadata, AnalysisResults, AnalyzerError};

/// Duplicate structure analyzer over decoded JSON documents.
///
/// Owns the reporting threshold. An analysis is a single synchronous pass:
/// walk the document, then aggregate the fingerprint table; the table never
/// outlives the run.
#[derive(Debug, Clone)]
pub struct DuplicateAnalyzer {
    threshold: usize,
}

impl Default for DuplicateAnalyzer {
    fn default() -> Self {
        Self {
            threshold: DUPLICATE_COUNT_THRESHOLD,
        }
    }
}

impl DuplicateAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `threshold` instead of [`DUPLICATE_COUNT_THRESHOLD`].
    pub fn with_threshold(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Analyzes an already-decoded document of known on-disk size.
    pub fn analyze_value(&self, document: &Value, file_size_in_bytes: u64) -> AnalysisResults {
        self.analyze(document, file_size_in_bytes, None)
    }

    /// Reads, decodes and analyzes the JSON document at `path`.
    ///
    /// A missing or unreadable path and malformed JSON are terminal errors;
    /// a document that decodes to `null` (or any non-mapping) yields empty
    /// results.
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisResults, AnalyzerError> {
        let to_input_error = |source| AnalyzerError::InputPath {
            path: path.to_path_buf(),
            source,
        };
        let file_size_in_bytes = fs::metadata(path).map_err(to_input_error)?.len();
        let content = fs::read_to_string(path).map_err(to_input_error)?;
        let document: Value =
            serde_json::from_str(&content).map_err(|source| AnalyzerError::MalformedJson {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(self.analyze(&document, file_size_in_bytes, Some(path.to_path_buf())))
    }

    fn analyze(
        &self,
        document: &Value,
        file_size_in_bytes: u64,
        source_path: Option<PathBuf>,
    ) -> AnalysisResults {
        let started_at = Utc::now();
        info!("parsing started at {}", started_at.to_rfc3339());

        if !document.is_object() {
            info!("document is empty or not a mapping, nothing to analyze");
        }

        let mut table = FingerprintTable::new();
        walk_document(document, &mut table);
        debug!("fingerprint table holds {} unique fingerprints", table.len());

        let records = aggregate(&table, file_size_in_bytes, self.threshold);
        let summary = summarize(&records, file_size_in_bytes);

        let finished_at = Utc::now();
        info!(
            "parsing ended at {}, {} duplicates reported",
            finished_at.to_rfc3339(),
            records.len()
        );

        AnalysisResults::new(
            records,
            summary,
            AnalysisMetadata {
                started_at,
                finished_at,
                source_path,
                file_size_in_bytes,
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        )
    }
}
