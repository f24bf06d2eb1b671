//! # sheetpick-cli
//!
//! Command-line interface for extracting purchase-list data from workbooks.

mod source;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use sheetpick_http::DEFAULT_TIMEOUT_SECS;
use sheetpick_sheet::{extract_bytes, ExtractOptions, ExtractionResult, SEQUENCE_KEY};
use source::Source;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// sheetpick - extract rows and records below a header row
#[derive(Parser)]
#[command(name = "sheetpick")]
#[command(author, version, about = "Extract rows and records from spreadsheet workbooks", long_about = None)]
struct Cli {
    /// Workbook path, file:// link or http(s):// link
    #[arg(value_name = "SOURCE")]
    source: String,

    /// Header row number (1-based)
    #[arg(short = 'r', long = "header-row", value_name = "N")]
    header_row: usize,

    /// Sheet to read (defaults to the first sheet)
    #[arg(short = 's', long = "sheet")]
    sheet: Option<String>,

    /// Output format (json, table)
    #[arg(short = 'f', long = "format", default_value = "json")]
    format: OutputFormat,

    /// Download timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output (default)
    #[default]
    Json,
    /// Plain table output
    Table,
}

impl Cli {
    fn options(&self) -> ExtractOptions {
        ExtractOptions {
            header_row: self.header_row,
            sheet_name: self.sheet.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match Source::parse(&cli.source).read(cli.timeout).await {
        Ok(bytes) => extract_bytes(bytes, &cli.options()),
        Err(e) => ExtractionResult::failure(&e),
    };

    match cli.format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_table(&result),
    }

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print the whole result as pretty JSON.
fn print_json(result: &ExtractionResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
    println!("{json}");
    Ok(())
}

/// Print the generic rows as a tab-separated table.
fn print_table(result: &ExtractionResult) {
    if !result.is_success() {
        eprintln!("{} {}", "Error:".red().bold(), result.message);
        return;
    }

    let header_line: Vec<&str> = std::iter::once(SEQUENCE_KEY)
        .chain(result.headers.iter().map(String::as_str))
        .collect();
    println!("{}", header_line.join("\t").bold());

    for row in &result.rows {
        let cells: Vec<String> = row.values().map(ToString::to_string).collect();
        println!("{}", cells.join("\t"));
    }

    println!(
        "{} ({} rows)",
        result.message.green(),
        result.rows.len()
    );
}
