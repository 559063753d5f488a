use serde::{Deserialize, Serialize};

/// Inclusive rectangle `(x1, y1)`-`(x2, y2)` in screen pixels
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Bounds {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Check whether a point lies inside the rectangle (edges included)
    ///
    /// NaN coordinates never match, so samples with missing positions
    /// fall through to "Outside".
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }

    /// Check whether two rectangles share at least one point
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }

    /// Bounds are usable when finite and not inverted on either axis
    pub fn is_well_formed(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|v| v.is_finite())
            && self.x1 <= self.x2
            && self.y1 <= self.y2
    }
}

/// Named Area of Interest loaded from TOML configuration
///
/// # Example TOML
/// ```toml
/// [[aoi]]
/// name = "Tool Area"
/// description = "Rack holding the hand tools"
/// bounds = { x1 = 100.0, y1 = 300.0, x2 = 200.0, y2 = 400.0 }
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AoiDefinition {
    /// Unique AOI name, used as the classification label
    pub name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub bounds: Bounds,
}

impl AoiDefinition {
    pub fn new(name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            description: None,
            bounds,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds.contains(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let b = Bounds::new(100.0, 100.0, 200.0, 200.0);
        assert!(b.contains(100.0, 100.0));
        assert!(b.contains(200.0, 200.0));
        assert!(b.contains(150.0, 199.9));
        assert!(!b.contains(99.9, 150.0));
        assert!(!b.contains(150.0, 200.1));
    }

    #[test]
    fn test_contains_rejects_nan() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(!b.contains(f64::NAN, 5.0));
        assert!(!b.contains(5.0, f64::NAN));
    }

    #[test]
    fn test_overlaps() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let touching = Bounds::new(10.0, 10.0, 20.0, 20.0);
        let apart = Bounds::new(11.0, 0.0, 20.0, 10.0);

        assert!(a.overlaps(&touching)); // Shared corner counts
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_well_formed() {
        assert!(Bounds::new(0.0, 0.0, 0.0, 0.0).is_well_formed());
        assert!(!Bounds::new(10.0, 0.0, 0.0, 10.0).is_well_formed());
        assert!(!Bounds::new(0.0, 10.0, 10.0, 0.0).is_well_formed());
        assert!(!Bounds::new(0.0, 0.0, f64::INFINITY, 10.0).is_well_formed());
    }
}
