use crate::aoi::OUTSIDE;
use crate::gaze::GazeSample;
use std::collections::BTreeMap;

/// Gaze samples paired with their AOI labels
#[derive(Debug, Clone)]
pub struct LabeledDataset<'a> {
    samples: &'a [GazeSample],
    labels: Vec<&'a str>,
    latency_target: &'a str,
}

impl<'a> LabeledDataset<'a> {
    /// # Panics
    /// Panics if `labels` and `samples` differ in length.
    pub fn new(samples: &'a [GazeSample], labels: Vec<&'a str>, latency_target: &'a str) -> Self {
        assert_eq!(
            samples.len(),
            labels.len(),
            "every sample needs exactly one label"
        );
        Self {
            samples,
            labels,
            latency_target,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn labels(&self) -> &[&'a str] {
        &self.labels
    }

    /// AOI whose first fixation is timed
    pub fn latency_target(&self) -> &'a str {
        self.latency_target
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a GazeSample, &'a str)> + '_ {
        self.samples.iter().zip(self.labels.iter().copied())
    }
}

/// Totals derived from a labeled session
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    /// Summed duration per label; labels with no samples are absent
    pub fixation_by_aoi: BTreeMap<String, f64>,
    /// Sum over all groups, "Outside" included
    pub total_fixation: f64,
    /// Mean duration over every sample with a duration
    pub avg_duration: Option<f64>,
    /// Earliest timestamp among samples on the latency target
    pub first_target_fixation: Option<f64>,
}

impl Aggregates {
    /// Share of fixation time spent inside any AOI, in percent
    pub fn coverage(&self) -> f64 {
        let outside = self.fixation_by_aoi.get(OUTSIDE).copied().unwrap_or(0.0);
        (self.total_fixation - outside) / self.total_fixation * 100.0
    }
}

/// Group durations by label and compute the scalar aggregates
///
/// NaN durations and timestamps are skipped, so a label whose samples all
/// lack a duration still appears with a sum of zero. Returns `None` when
/// total fixation time is zero, which covers the empty dataset.
pub fn aggregate(labeled: &LabeledDataset<'_>) -> Option<Aggregates> {
    let mut fixation_by_aoi: BTreeMap<String, f64> = BTreeMap::new();
    let mut duration_sum = 0.0;
    let mut duration_count = 0usize;
    let mut first_target_fixation: Option<f64> = None;

    for (sample, label) in labeled.iter() {
        let group = fixation_by_aoi.entry(label.to_string()).or_insert(0.0);
        if !sample.duration.is_nan() {
            *group += sample.duration;
            duration_sum += sample.duration;
            duration_count += 1;
        }

        if label == labeled.latency_target() && !sample.timestamp.is_nan() {
            first_target_fixation = Some(match first_target_fixation {
                Some(t) => t.min(sample.timestamp),
                None => sample.timestamp,
            });
        }
    }

    let total_fixation: f64 = fixation_by_aoi.values().sum();
    tracing::debug!(
        "Aggregated {} samples into {} groups, total fixation {} ms",
        labeled.len(),
        fixation_by_aoi.len(),
        total_fixation
    );

    if total_fixation == 0.0 {
        tracing::debug!("Total fixation is zero, no metrics for this session");
        return None;
    }

    let avg_duration = (duration_count > 0).then(|| duration_sum / duration_count as f64);

    Some(Aggregates {
        fixation_by_aoi,
        total_fixation,
        avg_duration,
        first_target_fixation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(duration: f64, timestamp: f64) -> GazeSample {
        GazeSample::new(0.0, 0.0, duration, timestamp)
    }

    #[test]
    fn test_aggregate_groups_and_totals() {
        let samples = [sample(100.0, 10.0), sample(50.0, 20.0), sample(25.0, 5.0)];
        let labeled = LabeledDataset::new(&samples, vec!["A", "B", "A"], "B");

        let agg = aggregate(&labeled).unwrap();
        assert_eq!(agg.fixation_by_aoi.get("A"), Some(&125.0));
        assert_eq!(agg.fixation_by_aoi.get("B"), Some(&50.0));
        assert_eq!(agg.fixation_by_aoi.get(OUTSIDE), None);
        assert_eq!(agg.total_fixation, 175.0);
        assert_eq!(agg.first_target_fixation, Some(20.0));
        assert_eq!(agg.coverage(), 100.0);
    }

    #[test]
    fn test_aggregate_first_fixation_is_minimum() {
        let samples = [sample(10.0, 900.0), sample(10.0, 300.0), sample(10.0, 600.0)];
        let labeled = LabeledDataset::new(&samples, vec!["T", "T", OUTSIDE], "T");

        let agg = aggregate(&labeled).unwrap();
        assert_eq!(agg.first_target_fixation, Some(300.0));
    }

    #[test]
    fn test_aggregate_zero_total() {
        let samples = [sample(0.0, 1.0), sample(0.0, 2.0)];
        let labeled = LabeledDataset::new(&samples, vec!["A", OUTSIDE], "A");
        assert!(aggregate(&labeled).is_none());
    }

    #[test]
    fn test_aggregate_skips_nan() {
        let samples = [
            sample(f64::NAN, 10.0),
            sample(300.0, f64::NAN),
            sample(100.0, 40.0),
        ];
        let labeled = LabeledDataset::new(&samples, vec!["A", "A", OUTSIDE], "A");

        let agg = aggregate(&labeled).unwrap();
        assert_eq!(agg.total_fixation, 400.0);
        assert_eq!(agg.avg_duration, Some(200.0));
        // The NaN-duration row still carries a valid timestamp
        assert_eq!(agg.first_target_fixation, Some(10.0));
        assert_eq!(agg.coverage(), 75.0);
    }

    #[test]
    fn test_aggregate_all_nan_durations() {
        let samples = [sample(f64::NAN, 10.0)];
        let labeled = LabeledDataset::new(&samples, vec!["A"], "A");
        assert!(aggregate(&labeled).is_none());
    }

    #[test]
    #[should_panic(expected = "every sample needs exactly one label")]
    fn test_labeled_dataset_length_mismatch() {
        let samples = [sample(1.0, 1.0)];
        let _ = LabeledDataset::new(&samples, Vec::new(), "A");
    }
}
