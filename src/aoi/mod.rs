// Areas of Interest (AOIs) for gaze classification
//
// An AOI is a named, axis-aligned rectangle in screen space. The table of AOIs
// is loaded from TOML (or the embedded default) and passed explicitly to the
// metrics engine, so nothing in the pipeline reads ambient global state.
//
// Classification is first-match-wins over declaration order. Overlapping
// rectangles are legal; the earlier declaration takes the sample, and the
// overlap is reported as a warning when the table is loaded.

mod definition;
mod registry;

pub use definition::{AoiDefinition, Bounds};
pub use registry::{AoiTable, DEFAULT_LATENCY_TARGET, OUTSIDE};
