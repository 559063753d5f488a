//! Gaze samples and CSV ingestion
//!
//! A gaze log is a CSV file with at least the columns `x`, `y`, `duration`
//! and `timestamp`. Extra columns are ignored and column order is free.
//!
//! In [`IngestMode::Lenient`] an empty or non-numeric cell becomes NaN and
//! flows through the metrics engine (NaN positions classify as "Outside",
//! NaN durations and timestamps are skipped by aggregates).
//! [`IngestMode::Strict`] rejects such cells instead.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Columns every gaze log must provide
pub const REQUIRED_COLUMNS: [&str; 4] = ["x", "y", "duration", "timestamp"];

/// Errors raised while reading a gaze log
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to open gaze log {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}' (expected header with x,y,duration,timestamp)")]
    MissingColumn(&'static str),

    #[error("Malformed value {value:?} in column '{column}' at row {row}")]
    Malformed {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Result type for gaze ingestion
pub type Result<T> = std::result::Result<T, IngestError>;

/// How to treat cells that are empty or not numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestMode {
    /// Keep the row, store NaN
    #[default]
    Lenient,
    /// Reject the file
    Strict,
}

/// One fixation from the eye tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeSample {
    /// Horizontal position in pixels
    pub x: f64,
    /// Vertical position in pixels
    pub y: f64,
    /// Fixation length in milliseconds
    pub duration: f64,
    /// Milliseconds since session start
    pub timestamp: f64,
}

impl GazeSample {
    pub fn new(x: f64, y: f64, duration: f64, timestamp: f64) -> Self {
        Self {
            x,
            y,
            duration,
            timestamp,
        }
    }
}

/// Ordered gaze samples for a single worker session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GazeDataset {
    worker_id: Option<String>,
    samples: Vec<GazeSample>,
}

impl GazeDataset {
    pub fn new(samples: Vec<GazeSample>) -> Self {
        Self {
            worker_id: None,
            samples,
        }
    }

    /// Attach the worker identifier shown in reports
    pub fn with_worker_id(mut self, worker_id: impl Into<String>) -> Self {
        self.worker_id = Some(worker_id.into());
        self
    }

    pub fn worker_id(&self) -> Option<&str> {
        self.worker_id.as_deref()
    }

    pub fn samples(&self) -> &[GazeSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read a gaze log from disk
    ///
    /// The worker id defaults to the file stem (`worker_17.csv` -> `worker_17`).
    pub fn from_csv_path<P: AsRef<Path>>(path: P, mode: IngestMode) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IngestError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let dataset = Self::from_reader(file, mode)?;
        Ok(match worker_id_from_path(path) {
            Some(id) => dataset.with_worker_id(id),
            None => dataset,
        })
    }

    /// Parse a gaze log from any CSV source
    pub fn from_reader<R: Read>(reader: R, mode: IngestMode) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut columns = [0usize; 4];
        for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == name)
                .ok_or(IngestError::MissingColumn(name))?;
        }
        let [x_col, y_col, duration_col, timestamp_col] = columns;

        let mut samples = Vec::new();
        let mut nan_rows = 0usize;
        for (index, record) in rdr.records().enumerate() {
            let record = record?;
            let row = index + 1;
            let cell = |col: usize, name: &'static str| {
                parse_cell(record.get(col).unwrap_or(""), row, name, mode)
            };

            let sample = GazeSample {
                x: cell(x_col, "x")?,
                y: cell(y_col, "y")?,
                duration: cell(duration_col, "duration")?,
                timestamp: cell(timestamp_col, "timestamp")?,
            };

            if [sample.x, sample.y, sample.duration, sample.timestamp]
                .iter()
                .any(|v| v.is_nan())
            {
                nan_rows += 1;
            }
            samples.push(sample);
        }

        if nan_rows > 0 {
            tracing::warn!(
                "{} of {} gaze rows have missing or non-numeric values",
                nan_rows,
                samples.len()
            );
        }
        tracing::debug!("Parsed {} gaze samples", samples.len());

        Ok(Self::new(samples))
    }
}

impl FromIterator<GazeSample> for GazeDataset {
    fn from_iter<I: IntoIterator<Item = GazeSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Derive a worker id from a log file name
pub fn worker_id_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

fn parse_cell(raw: &str, row: usize, column: &'static str, mode: IngestMode) -> Result<f64> {
    let parsed = raw.parse::<f64>().ok();
    match (parsed, mode) {
        (Some(v), IngestMode::Lenient) => Ok(v),
        (Some(v), IngestMode::Strict) if v.is_finite() => Ok(v),
        (None, IngestMode::Lenient) => Ok(f64::NAN),
        _ => Err(IngestError::Malformed {
            row,
            column,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_basic() {
        let csv = "x,y,duration,timestamp\n150,150,100,50\n350,120,80,400\n";
        let dataset = GazeDataset::from_reader(csv.as_bytes(), IngestMode::Strict).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.samples()[0], GazeSample::new(150.0, 150.0, 100.0, 50.0));
        assert_eq!(dataset.samples()[1].timestamp, 400.0);
        assert!(dataset.worker_id().is_none());
    }

    #[test]
    fn test_parse_extra_and_reordered_columns() {
        let csv = "timestamp, pupil ,duration,y,x\n50,3.1,100,150,160\n";
        let dataset = GazeDataset::from_reader(csv.as_bytes(), IngestMode::Strict).unwrap();

        assert_eq!(dataset.samples(), &[GazeSample::new(160.0, 150.0, 100.0, 50.0)]);
    }

    #[test]
    fn test_parse_header_only() {
        let csv = "x,y,duration,timestamp\n";
        let dataset = GazeDataset::from_reader(csv.as_bytes(), IngestMode::Lenient).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let csv = "x,y,duration\n1,2,3\n";
        for mode in [IngestMode::Lenient, IngestMode::Strict] {
            let err = GazeDataset::from_reader(csv.as_bytes(), mode).unwrap_err();
            assert!(matches!(err, IngestError::MissingColumn("timestamp")));
        }
    }

    #[test]
    fn test_lenient_non_numeric_becomes_nan() {
        let csv = "x,y,duration,timestamp\n150,150,abc,\n";
        let dataset = GazeDataset::from_reader(csv.as_bytes(), IngestMode::Lenient).unwrap();

        let sample = dataset.samples()[0];
        assert_eq!(sample.x, 150.0);
        assert!(sample.duration.is_nan());
        assert!(sample.timestamp.is_nan());
    }

    #[test]
    fn test_lenient_short_row_becomes_nan() {
        let csv = "x,y,duration,timestamp\n150,150\n";
        let dataset = GazeDataset::from_reader(csv.as_bytes(), IngestMode::Lenient).unwrap();

        assert!(dataset.samples()[0].duration.is_nan());
    }

    #[test]
    fn test_strict_rejects_non_numeric() {
        let csv = "x,y,duration,timestamp\n1,1,10,0\n150,150,abc,50\n";
        let err = GazeDataset::from_reader(csv.as_bytes(), IngestMode::Strict).unwrap_err();

        match err {
            IngestError::Malformed { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "duration");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_rejects_nan_literal() {
        let csv = "x,y,duration,timestamp\nNaN,1,10,0\n";
        let err = GazeDataset::from_reader(csv.as_bytes(), IngestMode::Strict).unwrap_err();
        assert!(err.to_string().contains("column 'x' at row 1"));
    }

    #[test]
    fn test_from_csv_path_sets_worker_id() {
        let mut file = tempfile::Builder::new()
            .prefix("worker_17")
            .suffix(".csv")
            .tempfile()
            .unwrap();
        writeln!(file, "x,y,duration,timestamp\n150,150,100,50").unwrap();
        file.flush().unwrap();

        let dataset = GazeDataset::from_csv_path(file.path(), IngestMode::Strict).unwrap();
        assert!(dataset.worker_id().unwrap().starts_with("worker_17"));
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_from_csv_path_missing_file() {
        let err = GazeDataset::from_csv_path("/nonexistent/gaze.csv", IngestMode::Lenient)
            .unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn test_worker_id_from_path() {
        assert_eq!(
            worker_id_from_path(Path::new("/data/worker_17.csv")),
            Some("worker_17".to_string())
        );
        assert_eq!(worker_id_from_path(Path::new("/")), None);
    }

    #[test]
    fn test_collect_dataset() {
        let dataset: GazeDataset = (0..3)
            .map(|i| GazeSample::new(i as f64, 0.0, 10.0, i as f64))
            .collect();
        assert_eq!(dataset.len(), 3);
    }
}
