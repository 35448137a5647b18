/*!
# Reports Module

Report generation over analysis results in the formats the tool emits:

- **JSON** - machine-readable records for API and tooling integration
- **CSV** - flattened table for spreadsheet review
- **Text** - colored console summary with duplicate and leaf tables

## Usage

```rust,ignore
use json_dup_analyzer::reports::{ReportFormat, ReportManager};

let manager = ReportManager::new();
let json_output = manager.generate_report(&results, ReportFormat::Json)?;
manager.save_report(&results, ReportFormat::Csv, "outputs/csv/payload.csv".as_ref())?;
```
*/

pub mod csv;
pub mod json;
pub mod text;

pub use csv::CsvReporter;
pub use json::{JsonReportEntry, JsonReporter};
pub use text::TextReporter;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::core::AnalysisResults;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Machine-readable records for API integration.
    Json,
    /// Flattened table for spreadsheet review.
    Csv,
    /// Console summary.
    Text,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "text" | "txt" => Ok(ReportFormat::Text),
            _ => Err(anyhow::anyhow!("Unknown report format: {}", s)),
        }
    }
}

/// Report rendering options.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Format to render.
    pub format: ReportFormat,
    /// Default location for saved reports.
    pub output_path: Option<PathBuf>,
    /// ANSI colors in text output.
    pub use_colors: bool,
    /// Include the leaf-only tables in text output.
    pub include_leaf_tables: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            output_path: None,
            use_colors: text::supports_colors(),
            include_leaf_tables: true,
        }
    }
}

/// Trait for report generators.
pub trait ReportGenerator {
    /// Renders `results` in this generator's format.
    fn generate_report(&self, results: &AnalysisResults, config: &ReportConfig) -> Result<String>;

    /// Format this generator produces.
    fn supported_format() -> ReportFormat
    where
        Self: Sized;
}

/// Dispatches report generation and handles report file writing.
pub struct ReportManager {
    default_config: ReportConfig,
}

impl ReportManager {
    pub fn new() -> Self {
        Self {
            default_config: ReportConfig::default(),
        }
    }

    /// Uses `config` instead of the defaults.
    pub fn with_config(config: ReportConfig) -> Self {
        Self {
            default_config: config,
        }
    }

    /// Renders `results` in the requested format.
    pub fn generate_report(
        &self,
        results: &AnalysisResults,
        format: ReportFormat,
    ) -> Result<String> {
        let config = ReportConfig {
            format,
            ..self.default_config.clone()
        };
        match format {
            ReportFormat::Json => JsonReporter::new().generate_report(results, &config),
            ReportFormat::Csv => CsvReporter::new().generate_report(results, &config),
            ReportFormat::Text => TextReporter::new().generate_report(results, &config),
        }
    }

    /// Renders `results` and writes the report to `path`, creating parent
    /// directories as needed.
    pub fn save_report(
        &self,
        results: &AnalysisResults,
        format: ReportFormat,
        path: &Path,
    ) -> Result<()> {
        let content = self.generate_report(results, format)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write report to {}", path.display()))
    }
}

impl Default for ReportManager {
    fn default() -> Self {
        Self::new()
    }
}
