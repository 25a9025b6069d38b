use serde::{Deserialize, Serialize};

use crate::core::{
    AxisScaleMode, Bounds, ColorSpec, DateAnchor, SmoothingMethod, TimeAxisMap, ValueAnchor,
    ValueAxisMap, morph,
};
use crate::error::DigitizerResult;

/// Inputs for one extraction run.
///
/// Serializable so host applications can persist/load operator setup without
/// inventing their own ad-hoc format. A deserialized config is re-validated
/// by the engine before any run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub color: ColorSpec,
    #[serde(default)]
    pub bounds: Option<Bounds>,
    /// `None` disables smoothing (the default).
    #[serde(default)]
    pub smoothing: Option<SmoothingMethod>,
    /// Seals enclosed unmatched regions (hollow markers, filled-area
    /// outlines) before any closing; off by default.
    #[serde(default)]
    pub fill_holes: bool,
    /// Odd side length of the closing element; `None` skips closing.
    #[serde(default)]
    pub mask_closing: Option<usize>,
}

impl ExtractionConfig {
    /// Creates a minimal config: full-height scan, no smoothing, no cleanup.
    #[must_use]
    pub fn new(color: ColorSpec) -> Self {
        Self {
            color,
            bounds: None,
            smoothing: None,
            fill_holes: false,
            mask_closing: None,
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    #[must_use]
    pub fn with_smoothing(mut self, method: SmoothingMethod) -> Self {
        self.smoothing = Some(method);
        self
    }

    #[must_use]
    pub fn with_hole_filling(mut self) -> Self {
        self.fill_holes = true;
        self
    }

    #[must_use]
    pub fn with_mask_closing(mut self, element_side: usize) -> Self {
        self.mask_closing = Some(element_side);
        self
    }

    pub(crate) fn validate(&self) -> DigitizerResult<()> {
        if let Some(bounds) = &self.bounds {
            bounds.validate()?;
        }
        if let Some(method) = &self.smoothing {
            method.validate()?;
        }
        if let Some(element_side) = self.mask_closing {
            morph::validate_element_side(element_side)?;
        }
        Ok(())
    }
}

/// Two-anchor calibration for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    pub y_anchors: [ValueAnchor; 2],
    #[serde(default)]
    pub y_mode: AxisScaleMode,
    pub x_anchors: [DateAnchor; 2],
}

impl CalibrationConfig {
    #[must_use]
    pub fn new(y_anchors: [ValueAnchor; 2], x_anchors: [DateAnchor; 2]) -> Self {
        Self {
            y_anchors,
            y_mode: AxisScaleMode::default(),
            x_anchors,
        }
    }

    #[must_use]
    pub fn with_y_mode(mut self, mode: AxisScaleMode) -> Self {
        self.y_mode = mode;
        self
    }

    /// Builds both axis maps, surfacing any `CalibrationError` before a run.
    pub fn build_maps(&self) -> DigitizerResult<(ValueAxisMap, TimeAxisMap)> {
        let value_map =
            ValueAxisMap::from_anchors(self.y_anchors[0], self.y_anchors[1], self.y_mode)?;
        let time_map = TimeAxisMap::from_anchors(self.x_anchors[0], self.x_anchors[1])?;
        Ok((value_map, time_map))
    }
}
