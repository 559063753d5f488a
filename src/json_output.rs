//! JSON output format for attention reports
//!
//! Envelope: `{"version", "format": "gazemetrics-json-v1", "reports": [...]}`.
//! A report with no usable fixation time carries `"metrics": {}`.

use crate::metrics::MetricsRecord;
use crate::report::WorkerReport;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

fn metrics_or_empty<S: Serializer>(
    metrics: &Option<MetricsRecord>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match metrics {
        Some(record) => record.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// A single worker report
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// Worker identifier (file stem unless overridden)
    pub worker_id: String,
    /// Number of gaze rows read
    pub samples: usize,
    /// Five-key metrics record, or an empty object
    #[serde(serialize_with = "metrics_or_empty")]
    pub metrics: Option<MetricsRecord>,
    /// Fixation time per AOI in milliseconds
    pub fixation_by_aoi: BTreeMap<String, f64>,
}

impl From<&WorkerReport> for JsonReport {
    fn from(report: &WorkerReport) -> Self {
        Self {
            worker_id: report.worker_id.clone(),
            samples: report.samples,
            metrics: report.metrics.clone(),
            fixation_by_aoi: report.fixation_by_aoi.clone(),
        }
    }
}

/// Complete JSON output
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Gazemetrics version
    pub version: String,
    /// Output format identifier
    pub format: String,
    pub reports: Vec<JsonReport>,
}

impl JsonOutput {
    /// Create a new JSON output document
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "gazemetrics-json-v1".to_string(),
            reports: Vec::new(),
        }
    }

    pub fn add_report(&mut self, report: &WorkerReport) {
        self.reports.push(JsonReport::from(report));
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}
