use anyhow::{Context, Result};
use clap::Parser;
use gazemetrics::aoi::AoiTable;
use gazemetrics::cli::{Cli, OutputFormat};
use gazemetrics::csv_output::CsvOutput;
use gazemetrics::gaze::{GazeDataset, IngestMode};
use gazemetrics::html_output::HtmlOutput;
use gazemetrics::json_output::JsonOutput;
use gazemetrics::report::{self, WorkerReport, NO_DATA_MESSAGE};
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; warnings always, everything with --debug
fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Print the AOI table in classification order
fn print_aois(table: &AoiTable) {
    println!("=== AOI Table (first match wins) ===");
    for (i, aoi) in table.aois().iter().enumerate() {
        let b = &aoi.bounds;
        println!(
            "{}. {} ({}, {})-({}, {}){}",
            i + 1,
            aoi.name,
            b.x1,
            b.y1,
            b.x2,
            b.y2,
            aoi.description
                .as_deref()
                .map(|d| format!(" - {}", d))
                .unwrap_or_default()
        );
    }
    println!("Latency target: {}", table.latency_target());
    for (first, second) in table.overlapping_pairs() {
        println!("Overlap: {} takes precedence over {}", first, second);
    }
}

/// Render all reports in the requested format
fn render(reports: &[WorkerReport], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => reports
            .iter()
            .map(report::to_text)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            let mut output = JsonOutput::new();
            for r in reports {
                output.add_report(r);
            }
            let mut json = output.to_json().context("Failed to serialize JSON report")?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => {
            let mut output = CsvOutput::new();
            for r in reports {
                output.add_report(r);
            }
            output.to_csv()?
        }
        OutputFormat::Html => {
            let mut output = HtmlOutput::new();
            for r in reports {
                output.add_report(r);
            }
            output.to_html()
        }
    };
    Ok(rendered)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    if args.worker_id.is_some() && args.files.len() > 1 {
        anyhow::bail!(
            "--worker-id applies to a single file, got {} files",
            args.files.len()
        );
    }

    let table = match &args.aois {
        Some(path) => AoiTable::from_toml(path)?,
        None => AoiTable::default_table()?,
    };

    if args.list_aois {
        print_aois(&table);
        return Ok(());
    }

    let mode = if args.strict {
        IngestMode::Strict
    } else {
        IngestMode::Lenient
    };

    // Each file is analyzed on its own; nothing carries over between them
    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let mut dataset = GazeDataset::from_csv_path(path, mode)
            .with_context(|| format!("Failed to load gaze log {}", path.display()))?;
        if let Some(id) = &args.worker_id {
            dataset = dataset.with_worker_id(id.clone());
        }

        let report = report::analyze(&dataset, &table);
        if !report.has_metrics() {
            eprintln!("warning: {}: {}", report.worker_id, NO_DATA_MESSAGE);
        }
        reports.push(report);
    }

    let rendered = render(&reports, args.format)?;
    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}
