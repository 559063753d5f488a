//! CLI argument parsing for gazemetrics

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for attention reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
    /// Standalone HTML page
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "gazemetrics")]
#[command(version)]
#[command(about = "Eye-tracking attention metrics per worker from gaze CSV logs", long_about = None)]
pub struct Cli {
    /// Gaze log CSV files (columns x,y,duration,timestamp); one report per file
    #[arg(value_name = "CSV", required_unless_present = "list_aois")]
    pub files: Vec<PathBuf>,

    /// AOI table in TOML (defaults to the built-in workstation layout)
    #[arg(short = 'a', long = "aois", value_name = "FILE")]
    pub aois: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Worker id for the report (only with a single input file)
    #[arg(short = 'w', long = "worker-id", value_name = "ID")]
    pub worker_id: Option<String>,

    /// Reject files with empty or non-numeric cells instead of treating them as missing
    #[arg(long = "strict")]
    pub strict: bool,

    /// Write the report to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the AOI table in classification order and exit
    #[arg(long = "list-aois")]
    pub list_aois: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
