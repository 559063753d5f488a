use super::aggregate::Aggregates;
use super::scoring::{classify_performance, score, PerformanceLevel};
use serde::{Serialize, Serializer};

/// Display text for a value that could not be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Round to two decimal places, exact ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Render an optional metric with two decimals, or "N/A"
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn number_or_na<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}

/// Attention metrics for one worker session
///
/// Serializes with the report's display keys; values that could not be
/// computed serialize as the string "N/A".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord {
    /// Percent of fixation time inside any AOI, rounded to 2 decimals
    #[serde(rename = "AOI Coverage (%)")]
    pub aoi_coverage: f64,

    /// Mean fixation length in ms, rounded to 2 decimals
    #[serde(
        rename = "Average Fixation Duration (ms)",
        serialize_with = "number_or_na"
    )]
    pub avg_fixation_duration: Option<f64>,

    /// Earliest fixation on the latency target AOI, rounded to 2 decimals
    #[serde(
        rename = "Time to First Fixation (ms)",
        serialize_with = "number_or_na"
    )]
    pub time_to_first_fixation: Option<f64>,

    #[serde(rename = "Efficiency Score")]
    pub efficiency_score: u8,

    #[serde(rename = "Performance Level")]
    pub performance_level: PerformanceLevel,
}

impl MetricsRecord {
    /// Score the aggregates and round the reported values
    ///
    /// Scoring sees the unrounded values.
    pub fn from_aggregates(aggregates: &Aggregates) -> Self {
        let coverage = aggregates.coverage();
        let efficiency_score = score(
            coverage,
            aggregates.avg_duration,
            aggregates.first_target_fixation,
        );

        Self {
            aoi_coverage: round2(coverage),
            avg_fixation_duration: aggregates.avg_duration.map(round2),
            time_to_first_fixation: aggregates.first_target_fixation.map(round2),
            efficiency_score,
            performance_level: classify_performance(efficiency_score),
        }
    }
}
