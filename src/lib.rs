/*!
# JSON Duplicate Structure Analyzer

Scans an arbitrary JSON document (for example a captured API response) for
structurally identical sub-objects and arrays, fingerprints every composite
node, and reports which duplicates contribute most to the file size. The
results help decide whether a payload is worth normalizing or
deduplicating.

## Core Features

- **Recursive fingerprinting** - canonical, key-order-insensitive digests per composite node
- **Duplicate aggregation** - counts, occurrence labels and last-seen paths per fingerprint
- **Size impact statistics** - per-duplicate byte size and file-size percentage
- **Leaf object analysis** - plain objects split out to estimate achievable reduction
- **Report formats** - machine-readable JSON, CSV tables and colored console summaries
- **CLI interface** - single-pass batch analysis of captured payloads

## Architecture

```text
json-dup-analyzer
├── analyzer    - fingerprint walker, duplicate table, aggregation
├── core        - error types, analysis results and run metadata
└── reports     - JSON, CSV and console reporters
```

## Usage

### CLI

```bash
# Full analysis with JSON and CSV report files plus a console summary
json-dup-analyzer analyze --path response.json --output-dir outputs

# Console summary only, with a custom reporting threshold
json-dup-analyzer analyze --path response.json --format text --threshold 10
```

### Library

```rust,no_run
use json_dup_analyzer::analyze_file;

# fn main() -> Result<(), json_dup_analyzer::AnalyzerError> {
let results = analyze_file("response.json")?;
println!("{} duplicate structures reported", results.record_count());
# Ok(())
# }
```
*/

pub mod analyzer;
pub mod core;
pub mod reports;

// Re-export main types for convenience
pub use analyzer::{
    DuplicateAnalyzer, DuplicateRecord, FingerprintTable, SummaryStats, DUPLICATE_COUNT_THRESHOLD,
};
pub use core::{AnalysisMetadata, AnalysisResults, AnalyzerError};
pub use reports::{ReportConfig, ReportFormat, ReportManager};

use std::path::Path;

/// Analyzes the JSON document at `path` with the default threshold.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<AnalysisResults, AnalyzerError> {
    DuplicateAnalyzer::new().analyze_file(path.as_ref())
}
