/*!
# Error Types

Terminal errors for input loading and report writing. Analysis itself has
no error conditions: the walker assumes the finite, acyclic tree guaranteed
by JSON decoding, and empty documents simply produce empty results.
*/

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading the input document or writing reports.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The input path is missing or could not be read.
    #[error("input file not found or unreadable: {path}")]
    InputPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file exists but does not decode as JSON.
    #[error("malformed JSON in {path}")]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A report file could not be written.
    #[error("failed to write report to {path}")]
    ReportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
