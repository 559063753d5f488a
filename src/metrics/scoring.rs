//! Efficiency score and performance level
//!
//! The score is the sum of independent weighted rules. Rules are not
//! exclusive: coverage above 95% earns both coverage rules, for example.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stand-in latency when the target AOI was never fixated
pub const NO_FIXATION_SENTINEL_MS: f64 = 99_999.0;

/// Values the scoring rules inspect
///
/// A missing mean duration is NaN, which fails every comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub coverage: f64,
    pub avg_duration: f64,
    pub first_fixation: f64,
}

/// One additive clause of the efficiency score
#[derive(Debug, Clone, Copy)]
pub struct ScoringRule {
    pub name: &'static str,
    pub weight: u8,
    pub applies: fn(&ScoreInputs) -> bool,
}

fn coverage_at_least_90(i: &ScoreInputs) -> bool {
    i.coverage >= 90.0
}

fn short_fixations(i: &ScoreInputs) -> bool {
    i.avg_duration < 200.0
}

fn quick_target_fixation(i: &ScoreInputs) -> bool {
    i.first_fixation < 1000.0
}

fn coverage_above_95(i: &ScoreInputs) -> bool {
    i.coverage > 95.0
}

fn focused_and_brisk(i: &ScoreInputs) -> bool {
    i.coverage > 85.0 && i.avg_duration < 220.0
}

/// Scoring rules; weights sum to 100
pub const SCORING_RULES: [ScoringRule; 5] = [
    ScoringRule {
        name: "coverage >= 90%",
        weight: 30,
        applies: coverage_at_least_90,
    },
    ScoringRule {
        name: "average fixation < 200 ms",
        weight: 10,
        applies: short_fixations,
    },
    ScoringRule {
        name: "first target fixation < 1000 ms",
        weight: 15,
        applies: quick_target_fixation,
    },
    ScoringRule {
        name: "coverage > 95%",
        weight: 20,
        applies: coverage_above_95,
    },
    ScoringRule {
        name: "coverage > 85% and average fixation < 220 ms",
        weight: 25,
        applies: focused_and_brisk,
    },
];

/// Sum the weights of every rule that fires
pub fn score(coverage: f64, avg_duration: Option<f64>, first_fixation: Option<f64>) -> u8 {
    let inputs = ScoreInputs {
        coverage,
        avg_duration: avg_duration.unwrap_or(f64::NAN),
        first_fixation: first_fixation.unwrap_or(NO_FIXATION_SENTINEL_MS),
    };

    SCORING_RULES
        .iter()
        .filter(|rule| (rule.applies)(&inputs))
        .inspect(|rule| tracing::trace!("Scoring rule '{}' +{}", rule.name, rule.weight))
        .map(|rule| rule.weight)
        .sum()
}

/// Categorical bucket for an efficiency score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceLevel {
    Efficient,
    Acceptable,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl PerformanceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLevel::Efficient => "Efficient",
            PerformanceLevel::Acceptable => "Acceptable",
            PerformanceLevel::NeedsAttention => "Needs Attention",
            PerformanceLevel::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum score for each level, checked top to bottom
pub const PERFORMANCE_THRESHOLDS: [(u8, PerformanceLevel); 3] = [
    (85, PerformanceLevel::Efficient),
    (70, PerformanceLevel::Acceptable),
    (50, PerformanceLevel::NeedsAttention),
];

pub fn classify_performance(score: u8) -> PerformanceLevel {
    PERFORMANCE_THRESHOLDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map_or(PerformanceLevel::HighRisk, |&(_, level)| level)
}
