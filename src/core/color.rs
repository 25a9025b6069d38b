use serde::{Deserialize, Serialize};

use crate::core::raster::Rgb;

/// Default per-channel matching tolerance.
pub const DEFAULT_TOLERANCE: u8 = 15;

/// Target color plus matching tolerance, picked by the operator.
///
/// Matching uses the per-channel (box) metric: a pixel matches when every RGB
/// channel sits within `tolerance` of the corresponding target channel. The
/// alternative Euclidean metric is intentionally not supported; the box test
/// admits more pixels near color-space diagonals and is what chart scans with
/// antialiased strokes calibrate their tolerances against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub target: Rgb,
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,
}

fn default_tolerance() -> u8 {
    DEFAULT_TOLERANCE
}

impl ColorSpec {
    /// Creates a spec with the default tolerance.
    #[must_use]
    pub fn new(target: Rgb) -> Self {
        Self {
            target,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns whether `pixel` falls within tolerance of the target color.
    ///
    /// Tolerance 0 means exact equality. Pure function with no side effects.
    #[must_use]
    pub fn matches(&self, pixel: Rgb) -> bool {
        channel_within(pixel.r, self.target.r, self.tolerance)
            && channel_within(pixel.g, self.target.g, self.tolerance)
            && channel_within(pixel.b, self.target.b, self.tolerance)
    }
}

fn channel_within(value: u8, target: u8, tolerance: u8) -> bool {
    value.abs_diff(target) <= tolerance
}
