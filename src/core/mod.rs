/*!
# Core Module

Error types and result containers shared by the analyzer and the
reporters.
*/

pub mod errors;
pub mod results;

pub use errors::AnalyzerError;
pub use results::{AnalysisMetadata, AnalysisResults};
