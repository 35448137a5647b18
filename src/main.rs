/*!
# JSON Duplicate Analyzer CLI

Command-line interface for the JSON duplicate structure analyzer.
*/

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::{style, Term};
use tracing::info;

use json_dup_analyzer::analyzer::DuplicateAnalyzer;
use json_dup_analyzer::reports::{ReportFormat, ReportManager};
use json_dup_analyzer::DUPLICATE_COUNT_THRESHOLD;

#[derive(Parser)]
#[command(
    name = "json-dup-analyzer",
    version = env!("CARGO_PKG_VERSION"),
    author = "JSON Dup Analyzer Team",
    about = "JSON payload duplicate structure analyzer with size impact reporting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON document for duplicated structures
    Analyze {
        /// Path to the JSON document
        #[arg(short, long)]
        path: PathBuf,

        /// Directory for the JSON and CSV report files
        #[arg(short, long, default_value = "outputs")]
        output_dir: PathBuf,

        /// Sighting count a duplicate must exceed to be reported
        #[arg(short, long, default_value_t = DUPLICATE_COUNT_THRESHOLD)]
        threshold: usize,

        /// Reports to produce (text, json, csv, all)
        #[arg(short, long, default_value = "all")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("json_dup_analyzer={}", log_level))
        .init();

    match cli.command {
        Commands::Analyze {
            path,
            output_dir,
            threshold,
            format,
        } => analyze_command(&path, &output_dir, threshold, &format),
    }
}

fn analyze_command(path: &Path, output_dir: &Path, threshold: usize, format: &str) -> Result<()> {
    let term = Term::stdout();
    let started = Instant::now();

    // "all" produces every report; otherwise a single format is rendered.
    let selected = match format.to_lowercase().as_str() {
        "all" => None,
        other => Some(other.parse::<ReportFormat>()?),
    };

    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", path.display());
    }

    term.write_line(&format!(
        "🔍 {} {}",
        style("Analyzing").bold().cyan(),
        style(path.display()).bold()
    ))?;

    let analyzer = DuplicateAnalyzer::with_threshold(threshold);
    let results = analyzer
        .analyze_file(path)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;

    let manager = ReportManager::new();
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("report");

    if matches!(selected, None | Some(ReportFormat::Json)) {
        let json_path = output_dir.join(format!("{}.json", stem));
        manager.save_report(&results, ReportFormat::Json, &json_path)?;
        term.write_line(&format!(
            "✅ {} {}",
            style("Created").green(),
            json_path.display()
        ))?;
    }

    if matches!(selected, None | Some(ReportFormat::Csv)) {
        let csv_path = output_dir.join("csv").join(format!("{}.csv", stem));
        manager.save_report(&results, ReportFormat::Csv, &csv_path)?;
        term.write_line(&format!(
            "✅ {} {}",
            style("Created").green(),
            csv_path.display()
        ))?;
    }

    if matches!(selected, None | Some(ReportFormat::Text)) {
        let summary = manager.generate_report(&results, ReportFormat::Text)?;
        term.write_line(&summary)?;
    }

    info!("analysis completed in {:?}", started.elapsed());
    Ok(())
}
