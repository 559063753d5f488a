//! Per-worker report assembled from the metrics pipeline
//!
//! Wraps the metrics record with what a reader needs to interpret it: the
//! worker, the sample count and the per-AOI fixation breakdown.

use crate::aoi::AoiTable;
use crate::gaze::GazeDataset;
use crate::metrics::{aggregate, classify, format_value, round2, MetricsRecord};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Worker id used when the dataset carries none
pub const UNKNOWN_WORKER: &str = "unknown";

/// Message shown when a session has no usable fixation time
pub const NO_DATA_MESSAGE: &str = "No meaningful gaze data found in this file.";

/// Attention report for one worker session
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerReport {
    pub worker_id: String,
    pub samples: usize,
    /// `None` when total fixation time is zero
    pub metrics: Option<MetricsRecord>,
    /// Fixation time per AOI in ms, rounded to 2 decimals
    pub fixation_by_aoi: BTreeMap<String, f64>,
}

impl WorkerReport {
    pub fn has_metrics(&self) -> bool {
        self.metrics.is_some()
    }
}

/// Run the metrics pipeline and keep the breakdown for display
pub fn analyze(dataset: &GazeDataset, table: &AoiTable) -> WorkerReport {
    let worker_id = dataset.worker_id().unwrap_or(UNKNOWN_WORKER).to_string();
    let labeled = classify(dataset, table);

    let (metrics, fixation_by_aoi) = match aggregate(&labeled) {
        Some(aggregates) => {
            let record = MetricsRecord::from_aggregates(&aggregates);
            let breakdown = aggregates
                .fixation_by_aoi
                .into_iter()
                .map(|(aoi, ms)| (aoi, round2(ms)))
                .collect();
            (Some(record), breakdown)
        }
        None => (None, BTreeMap::new()),
    };

    tracing::info!(
        "Analyzed {} samples for worker {}: {}",
        dataset.len(),
        worker_id,
        metrics
            .as_ref()
            .map_or("no metrics".to_string(), |m| m.performance_level.to_string())
    );

    WorkerReport {
        worker_id,
        samples: dataset.len(),
        metrics,
        fixation_by_aoi,
    }
}

/// Human-readable summary for terminal output
pub fn to_text(report: &WorkerReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Summary for {} ===", report.worker_id);
    let _ = writeln!(out, "Samples: {}", report.samples);

    let Some(metrics) = &report.metrics else {
        let _ = writeln!(out, "{}", NO_DATA_MESSAGE);
        return out;
    };

    let _ = writeln!(out, "AOI Coverage (%):               {:.2}", metrics.aoi_coverage);
    let _ = writeln!(
        out,
        "Average Fixation Duration (ms): {}",
        format_value(metrics.avg_fixation_duration)
    );
    let _ = writeln!(
        out,
        "Time to First Fixation (ms):    {}",
        format_value(metrics.time_to_first_fixation)
    );
    let _ = writeln!(out, "Efficiency Score:               {}", metrics.efficiency_score);
    let _ = writeln!(out, "Performance Level:              {}", metrics.performance_level);

    out.push('\n');
    let _ = writeln!(out, "{:<24} {:>12}", "AOI", "Fixation ms");
    let _ = writeln!(out, "─────────────────────────────────────");
    for (aoi, ms) in &report.fixation_by_aoi {
        let _ = writeln!(out, "{:<24} {:>12.2}", aoi, ms);
    }

    out
}
