//! CSV output format for attention reports
//!
//! One row per worker for spreadsheet analysis. Reports without usable
//! fixation time keep the worker id and leave the metric cells empty.

use crate::metrics::format_value;
use crate::report::WorkerReport;
use anyhow::{Context, Result};

/// CSV report formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<WorkerReport>,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a worker report to the output
    pub fn add_report(&mut self, report: &WorkerReport) {
        self.rows.push(report.clone());
    }

    const HEADER: [&str; 6] = [
        "worker_id",
        "aoi_coverage_pct",
        "avg_fixation_duration_ms",
        "time_to_first_fixation_ms",
        "efficiency_score",
        "performance_level",
    ];

    /// Cells of one worker row, unquoted
    fn format_report(report: &WorkerReport) -> Vec<String> {
        let mut fields = vec![report.worker_id.clone()];

        match &report.metrics {
            Some(m) => {
                fields.push(format!("{:.2}", m.aoi_coverage));
                fields.push(format_value(m.avg_fixation_duration));
                fields.push(format_value(m.time_to_first_fixation));
                fields.push(m.efficiency_score.to_string());
                fields.push(m.performance_level.to_string());
            }
            None => fields.extend(std::iter::repeat(String::new()).take(5)),
        }

        fields
    }

    /// Generate CSV output as string
    ///
    /// Fields containing a delimiter, quote, or line break are quoted.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(Self::HEADER)
            .context("Failed to write CSV header")?;
        for report in &self.rows {
            writer
                .write_record(Self::format_report(report))
                .with_context(|| format!("Failed to write CSV row for {}", report.worker_id))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .context("Failed to flush CSV output")?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }
}
