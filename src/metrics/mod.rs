// Gaze attention metrics
//
// Pipeline for one worker session:
//
//   samples -> classify (AOI label per sample, first match wins)
//           -> aggregate (duration per AOI, mean duration, first fixation
//              on the latency target)
//           -> score (additive rule table, 0..=100)
//           -> classify_performance (threshold table)
//
// Every call is a pure function of the dataset and the AOI table. Nothing is
// cached between calls, so datasets can be processed in any order.
//
// A session whose total fixation time is zero (including the empty session)
// yields no record; callers present that as "no meaningful data".

mod aggregate;
mod record;
mod scoring;

pub use aggregate::{aggregate, Aggregates, LabeledDataset};
pub use record::{format_value, round2, MetricsRecord, NOT_AVAILABLE};
pub use scoring::{
    classify_performance, score, PerformanceLevel, ScoreInputs, ScoringRule,
    NO_FIXATION_SENTINEL_MS, PERFORMANCE_THRESHOLDS, SCORING_RULES,
};

use crate::aoi::AoiTable;
use crate::gaze::GazeDataset;

/// Label every sample with the first AOI containing it, or "Outside"
///
/// The dataset is left untouched; labels are returned alongside a borrow of
/// the samples in the same order.
pub fn classify<'a>(dataset: &'a GazeDataset, table: &'a AoiTable) -> LabeledDataset<'a> {
    let labels = dataset
        .samples()
        .iter()
        .map(|s| table.classify(s.x, s.y))
        .collect();

    LabeledDataset::new(dataset.samples(), labels, table.latency_target())
}

/// Compute the five-key metrics record for one session
///
/// Returns `None` when total fixation time is zero.
pub fn compute_metrics(dataset: &GazeDataset, table: &AoiTable) -> Option<MetricsRecord> {
    let labeled = classify(dataset, table);
    let aggregates = aggregate(&labeled)?;
    Some(MetricsRecord::from_aggregates(&aggregates))
}
