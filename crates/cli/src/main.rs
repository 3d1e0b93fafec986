//! # docfill-cli
//!
//! Command-line interface for docfill: fills the CPF/CNPJ column of a
//! receivables sheet from a reference sheet and writes the result.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use colored::Colorize;
use docfill_matcher::{load_input, DocfillConfig, MatchReport, ParseCache, TableRole};
use docfill_sheet::{Sheet, SheetFormat};
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// docfill - fill CPF/CNPJ columns from a reference spreadsheet
#[derive(Parser)]
#[command(name = "docfill")]
#[command(author, version, about = "Fill CPF/CNPJ columns from a reference spreadsheet", long_about = None)]
struct Cli {
    /// Reference spreadsheet with names and CPF/CNPJ
    #[arg(short = 'r', long = "reference", value_name = "FILE")]
    reference: PathBuf,

    /// Spreadsheet whose CPF column gets filled
    #[arg(short = 't', long = "target", value_name = "FILE")]
    target: PathBuf,

    /// Output file (.xlsx or .csv); defaults to resultado_<YYYYMMDD_HHMM>.xlsx
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Worksheet to read from the reference workbook
    #[arg(long = "reference-sheet", value_name = "NAME")]
    reference_sheet: Option<String>,

    /// Worksheet to read from the target workbook
    #[arg(long = "target-sheet", value_name = "NAME")]
    target_sheet: Option<String>,

    /// Print the first N rows of the result
    #[arg(short = 'p', long = "preview", value_name = "N")]
    preview: Option<usize>,

    /// Summary format (table, json)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for the run summary.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Pretty text output (default)
    #[default]
    Table,
    /// JSON output
    Json,
}

/// What a run produced.
#[derive(Debug, Serialize)]
struct RunSummary {
    output: PathBuf,
    elapsed_secs: f64,
    report: MatchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<Vec<Vec<String>>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let summary = run(&cli)?;
    print_summary(&summary, cli.format)
}

/// Load both inputs, fill the document column and write the result.
fn run(cli: &Cli) -> Result<RunSummary> {
    let started = Instant::now();

    let config = match &cli.config {
        Some(path) => DocfillConfig::from_path(path)?,
        None => DocfillConfig::default(),
    };
    let mut cache = config.parse_cache();

    let reference = read_input(
        TableRole::Reference,
        &cli.reference,
        cli.reference_sheet.as_deref(),
        &config,
        &mut cache,
    )?;
    let target = read_input(
        TableRole::Target,
        &cli.target,
        cli.target_sheet.as_deref(),
        &config,
        &mut cache,
    )?;

    let outcome = config.matcher().fill(&reference, target)?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_name(chrono::Local::now().naive_local()));
    outcome
        .sheet
        .save(&output)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;
    tracing::info!(output = %output.display(), "wrote result");

    Ok(RunSummary {
        output,
        elapsed_secs: started.elapsed().as_secs_f64(),
        preview: cli.preview.map(|n| preview_rows(&outcome.sheet, n)),
        report: outcome.report,
    })
}

/// Read one input file and decode it by extension.
fn read_input(
    table: TableRole,
    path: &Path,
    sheet_name: Option<&str>,
    config: &DocfillConfig,
    cache: &mut ParseCache,
) -> Result<Sheet> {
    let format = SheetFormat::from_path(path)
        .with_context(|| format!("Unsupported {table} file: {}", path.display()))?;
    if sheet_name.is_some() && format != SheetFormat::Workbook {
        anyhow::bail!(
            "A worksheet name was given for the {table}, but {} is not a workbook",
            path.display()
        );
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {table}: {}", path.display()))?;

    let mut options = config.load_options();
    if let Some(name) = sheet_name {
        options = options.with_sheet_name(name);
    }

    Ok(load_input(table, &bytes, format, &options, Some(cache))?)
}

/// `resultado_<YYYYMMDD_HHMM>.xlsx` for the given moment.
fn default_output_name(now: NaiveDateTime) -> PathBuf {
    PathBuf::from(format!("resultado_{}.xlsx", now.format("%Y%m%d_%H%M")))
}

/// Header plus the first `n` data rows, as text.
fn preview_rows(sheet: &Sheet, n: usize) -> Vec<Vec<String>> {
    let head = sheet.head(n);
    std::iter::once(head.column_names().to_vec())
        .chain(head.rows().map(|row| row.iter().map(|c| c.to_text()).collect()))
        .collect()
}

/// Preview rows as a box-drawn table; the first row is the header.
fn render_table(rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    let mut rows = rows.iter();
    if let Some(header) = rows.next() {
        table.set_titles(Row::new(
            header.iter().map(|name| Cell::new(name).style_spec("bFg")).collect(),
        ));
    }
    for row in rows {
        table.add_row(Row::new(row.iter().map(|value| Cell::new(value)).collect()));
    }
    table
}

fn print_summary(summary: &RunSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Table => {
            let report = &summary.report;
            println!(
                "{} Done in {:.2} seconds",
                "✓".green().bold(),
                summary.elapsed_secs
            );
            println!(
                "  {} {} of {} rows matched, {} left empty",
                "Rows:".cyan(),
                report.matched,
                report.target_rows,
                report.unmatched()
            );
            println!(
                "  {} {} → {} (lookup {} → {})",
                "Columns:".cyan(),
                report.columns.entity_name,
                report.columns.document_id,
                report.columns.person_name,
                report.columns.document_target
            );
            if !report.duplicate_names.is_empty() {
                println!(
                    "  {} {} names repeat in the reference table",
                    "Warning:".yellow().bold(),
                    report.duplicate_names.len()
                );
            }
            println!("  {} {}", "Output:".cyan(), summary.output.display());

            if let Some(rows) = &summary.preview {
                println!();
                render_table(rows).printstd();
            }
        }
    }
    Ok(())
}
