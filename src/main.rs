use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use listing_ingest::config::Config;
use listing_ingest::ingest::{self, headers::HeaderSlot};
use listing_ingest::logging;
use listing_ingest::metrics::IngestMetrics;
use listing_ingest::report::{self, ErrorReport, ParseReport};

/// How many row errors the summary prints before truncating
const ERRORS_SHOWN: usize = 20;

#[derive(Parser)]
#[command(name = "listing-ingest")]
#[command(about = "Normalize broker property spreadsheets into projects and unit configurations")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./listing-ingest.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV/TSV export and write the JSON result for review
    Parse {
        /// Spreadsheet export to read
        file: PathBuf,
        /// Write the report here instead of the configured output directory
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write only stats and row errors
        #[arg(long)]
        errors_only: bool,
    },
    /// Show the detected delimiter and how each column maps
    Headers {
        /// Spreadsheet export to read
        file: PathBuf,
    },
}

/// Broker files are not always UTF-8; undecodable bytes are replaced.
fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run_parse(config: &Config, file: &Path, out: Option<PathBuf>, errors_only: bool) -> Result<()> {
    let text = read_source(file)?;
    let result = ingest::parse(&text).with_context(|| format!("Failed to parse {}", file.display()))?;
    let stats = &result.stats;

    println!("📊 Parse results for {}:", file.display());
    println!("   Delimiter: {}", stats.delimiter);
    println!("   Data rows: {}", stats.total_rows);
    println!("   Projects: {}", stats.projects_created);
    println!("   Configurations: {}", stats.configurations_created);
    println!("   Errors: {}", stats.error_count);
    println!(
        "   Skipped: {} (blank {}, no specification {}, notes {}, orphan continuations {}, missing identity {})",
        stats.skipped.total(),
        stats.skipped.blank,
        stats.skipped.missing_specification,
        stats.skipped.note_row,
        stats.skipped.orphan_continuation,
        stats.skipped.missing_identity,
    );
    if !stats.unmapped_headers.is_empty() {
        println!("   Ignored columns: {}", stats.unmapped_headers.join(", "));
    }

    if !result.errors.is_empty() {
        println!("\n⚠️  Row errors:");
        for err in result.errors.iter().take(ERRORS_SHOWN) {
            println!("   - row {} [{}]: {}", err.row_number, err.field, err.reason);
        }
        if result.errors.len() > ERRORS_SHOWN {
            println!("   ... and {} more", result.errors.len() - ERRORS_SHOWN);
        }
    }

    let generated_at = Utc::now();
    let path = out.unwrap_or_else(|| report::default_report_path(&config.output.dir, file, generated_at));
    let source_file = file.display().to_string();
    if errors_only {
        let report = ErrorReport {
            generated_at,
            source_file,
            stats: &result.stats,
            errors: &result.errors,
        };
        report::write_report(&path, &report, config.output.pretty)?;
    } else {
        let report = ParseReport {
            generated_at,
            source_file,
            result: &result,
        };
        report::write_report(&path, &report, config.output.pretty)?;
    }
    info!(path = %path.display(), "report written");
    println!("\n✅ Report written to {}", path.display());
    Ok(())
}

fn run_headers(file: &Path) -> Result<()> {
    let text = read_source(file)?;
    let layout = ingest::detect_layout(&text).with_context(|| format!("Failed to read header of {}", file.display()))?;

    println!("Delimiter: {}", layout.delimiter.name());
    println!("Header line: {}", layout.header_line_number);
    for (position, slot) in layout.headers.slots().iter().enumerate() {
        match slot {
            HeaderSlot::Mapped(field) => println!("   {:>3}  → {}", position + 1, field),
            HeaderSlot::Unmapped(name) => println!("   {:>3}  ✗ '{}' (ignored)", position + 1, name),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let _guard = logging::init_logging(&config.logging);
    IngestMetrics::describe();

    let outcome = match cli.command {
        Commands::Parse { file, out, errors_only } => run_parse(&config, &file, out, errors_only),
        Commands::Headers { file } => run_headers(&file),
    };

    if let Err(e) = &outcome {
        error!("Command failed: {:#}", e);
    }
    outcome
}
