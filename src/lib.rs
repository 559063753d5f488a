//! Gazemetrics - eye-tracking attention metrics for assembly workers
//!
//! This library classifies gaze fixations into rectangular Areas of Interest,
//! aggregates fixation time per AOI and scores each worker session with an
//! efficiency score and performance level.
//!
//! ```
//! use gazemetrics::aoi::AoiTable;
//! use gazemetrics::gaze::{GazeDataset, GazeSample};
//! use gazemetrics::metrics::{compute_metrics, PerformanceLevel};
//!
//! let table = AoiTable::default_table()?;
//! let dataset = GazeDataset::new(vec![GazeSample::new(150.0, 150.0, 100.0, 50.0)]);
//!
//! let record = compute_metrics(&dataset, &table).expect("non-zero fixation time");
//! assert_eq!(record.efficiency_score, 85);
//! assert_eq!(record.performance_level, PerformanceLevel::Efficient);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aoi;
pub mod cli;
pub mod csv_output;
pub mod gaze;
pub mod html_output;
pub mod json_output;
pub mod metrics;
pub mod report;
