use crate::aoi::AoiDefinition;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Label assigned to samples that fall in no AOI
pub const OUTSIDE: &str = "Outside";

/// AOI whose first fixation is timed when the table does not name one
pub const DEFAULT_LATENCY_TARGET: &str = "Instruction Label";

#[derive(serde::Deserialize)]
struct AoiFile {
    #[serde(default)]
    latency_target: Option<String>,
    aoi: Vec<AoiDefinition>,
}

/// Ordered, read-only table of Areas of Interest
///
/// Declaration order is classification order: the first AOI whose rectangle
/// contains a sample claims it.
///
/// # Example Usage
/// ```no_run
/// use gazemetrics::aoi::AoiTable;
///
/// let table = AoiTable::from_toml("aois.toml")?;
/// println!("{}", table.classify(150.0, 150.0));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AoiTable {
    /// AOIs in declaration order
    aois: Vec<AoiDefinition>,

    /// Name of the AOI used for time-to-first-fixation
    latency_target: String,

    /// Index pairs of rectangles that share at least one point
    overlapping: Vec<(usize, usize)>,
}

impl AoiTable {
    /// Load an AOI table from a TOML configuration file
    ///
    /// # Errors
    /// Returns error if the file doesn't exist, has invalid TOML syntax, or
    /// fails validation (see [`AoiTable::new`]).
    ///
    /// # Example TOML
    /// ```toml
    /// latency_target = "Instruction Label"
    ///
    /// [[aoi]]
    /// name = "Instruction Label"
    /// bounds = { x1 = 300.0, y1 = 100.0, x2 = 400.0, y2 = 200.0 }
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read AOI file: {}", path.as_ref().display()))?;

        Self::from_toml_str(&content).with_context(|| {
            format!("Invalid AOI definitions in {}", path.as_ref().display())
        })
    }

    /// Parse an AOI table from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: AoiFile =
            toml::from_str(content).context("Failed to parse TOML AOI definitions")?;
        let latency_target = file
            .latency_target
            .unwrap_or_else(|| DEFAULT_LATENCY_TARGET.to_string());

        Self::new(file.aoi, latency_target)
    }

    /// Load the built-in workstation layout
    ///
    /// Uses embedded aois-default.toml compiled into the binary for zero-config operation.
    pub fn default_table() -> Result<Self> {
        const DEFAULT_TOML: &str = include_str!("../../aois-default.toml");

        Self::from_toml_str(DEFAULT_TOML).context("Failed to parse embedded aois-default.toml")
    }

    /// Build a table from definitions in classification order
    ///
    /// # Errors
    /// Rejects an empty table, duplicate names, the reserved name "Outside",
    /// non-finite or inverted bounds, and a latency target that names no AOI.
    /// Overlapping rectangles are accepted and logged as a warning.
    pub fn new(aois: Vec<AoiDefinition>, latency_target: impl Into<String>) -> Result<Self> {
        let latency_target = latency_target.into();

        if aois.is_empty() {
            anyhow::bail!("AOI table must define at least one AOI");
        }

        let mut seen = HashSet::new();
        for aoi in &aois {
            if aoi.name == OUTSIDE {
                anyhow::bail!("AOI name '{}' is reserved for unclassified samples", OUTSIDE);
            }
            if !seen.insert(aoi.name.as_str()) {
                anyhow::bail!("Duplicate AOI '{}'", aoi.name);
            }
            if !aoi.bounds.is_well_formed() {
                let b = &aoi.bounds;
                anyhow::bail!(
                    "AOI '{}' has invalid bounds ({}, {})-({}, {}): expected finite x1 <= x2 and y1 <= y2",
                    aoi.name,
                    b.x1,
                    b.y1,
                    b.x2,
                    b.y2
                );
            }
        }

        if !seen.contains(latency_target.as_str()) {
            anyhow::bail!(
                "latency_target '{}' does not match any defined AOI",
                latency_target
            );
        }

        let mut overlapping = Vec::new();
        for (i, a) in aois.iter().enumerate() {
            for (j, b) in aois.iter().enumerate().skip(i + 1) {
                if a.bounds.overlaps(&b.bounds) {
                    tracing::warn!(
                        "AOIs '{}' and '{}' overlap; samples in the overlap are labeled '{}'",
                        a.name,
                        b.name,
                        a.name
                    );
                    overlapping.push((i, j));
                }
            }
        }

        Ok(Self {
            aois,
            latency_target,
            overlapping,
        })
    }

    /// Label a gaze point with the first AOI containing it, or "Outside"
    pub fn classify(&self, x: f64, y: f64) -> &str {
        self.aois
            .iter()
            .find(|aoi| aoi.contains(x, y))
            .map_or(OUTSIDE, |aoi| aoi.name.as_str())
    }

    /// Get AOI definition by name
    pub fn get(&self, name: &str) -> Option<&AoiDefinition> {
        self.aois.iter().find(|a| a.name == name)
    }

    /// Get all AOIs in classification order
    pub fn aois(&self) -> &[AoiDefinition] {
        &self.aois
    }

    pub fn latency_target(&self) -> &str {
        &self.latency_target
    }

    /// Names of overlapping AOI pairs, earlier declaration first
    pub fn overlapping_pairs(&self) -> Vec<(&str, &str)> {
        self.overlapping
            .iter()
            .map(|&(i, j)| (self.aois[i].name.as_str(), self.aois[j].name.as_str()))
            .collect()
    }
}
