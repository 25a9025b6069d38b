use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    CalibratedSeries, PixelPath, Raster, build_median_path, close_mask, fill_gaps,
    fill_mask_holes, scan_mask,
};
use crate::error::{DigitizerError, DigitizerResult};

use super::{CalibrationConfig, ExtractionConfig};

/// Main orchestration facade consumed by host applications.
///
/// `DigitizerEngine` holds the operator-assembled inputs and turns one raster
/// into one pixel path (and, when calibration is configured, one calibrated
/// series) per run. Runs are synchronous, single-threaded, and independent:
/// re-running after a tolerance or bounds change recomputes everything from
/// scratch with no state shared between runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitizerEngine {
    extraction: ExtractionConfig,
    calibration: Option<CalibrationConfig>,
}

impl DigitizerEngine {
    /// Creates an engine from a validated extraction config.
    pub fn new(extraction: ExtractionConfig) -> DigitizerResult<Self> {
        extraction.validate()?;
        Ok(Self {
            extraction,
            calibration: None,
        })
    }

    /// Attaches calibration, surfacing anchor problems immediately rather
    /// than at run time.
    pub fn with_calibration(mut self, calibration: CalibrationConfig) -> DigitizerResult<Self> {
        calibration.build_maps()?;
        self.calibration = Some(calibration);
        Ok(self)
    }

    #[must_use]
    pub fn extraction_config(&self) -> &ExtractionConfig {
        &self.extraction
    }

    #[must_use]
    pub fn calibration_config(&self) -> Option<&CalibrationConfig> {
        self.calibration.as_ref()
    }

    /// Replaces the extraction inputs for subsequent runs.
    pub fn set_extraction(&mut self, extraction: ExtractionConfig) -> DigitizerResult<()> {
        extraction.validate()?;
        self.extraction = extraction;
        Ok(())
    }

    /// Replaces the calibration inputs, validating both axis maps eagerly.
    pub fn set_calibration(&mut self, calibration: CalibrationConfig) -> DigitizerResult<()> {
        calibration.build_maps()?;
        self.calibration = Some(calibration);
        Ok(())
    }

    pub fn clear_calibration(&mut self) {
        self.calibration = None;
    }

    /// Runs scan, median reduction, gap filling, and optional smoothing,
    /// returning the pixel-space path.
    ///
    /// Useful on its own when calibration is not configured yet: the path can
    /// be previewed over the source image before anchors exist.
    pub fn extract_path(&self, raster: &Raster) -> DigitizerResult<PixelPath> {
        self.extraction.validate()?;

        let mut mask = scan_mask(raster, &self.extraction.color, self.extraction.bounds.as_ref());
        let match_count = mask.match_count();
        if match_count == 0 {
            return Err(DigitizerError::EmptyMatch);
        }

        if self.extraction.fill_holes {
            mask = fill_mask_holes(&mask);
        }
        if let Some(element_side) = self.extraction.mask_closing {
            mask = close_mask(&mask, element_side)?;
        }

        let raw_path = build_median_path(&mask.column_rows());
        debug!(
            match_count,
            resolved = raw_path.resolved_count(),
            holes = raw_path.hole_count(),
            "median path built"
        );

        let mut path = fill_gaps(&raw_path)?;

        if let Some(method) = &self.extraction.smoothing {
            let rows = method.apply(path.rows())?;
            debug!(?method, columns = rows.len(), "path smoothed");
            path = PixelPath::from_rows(rows);
        }

        Ok(path)
    }

    /// Full extraction run: pixel path plus calibrated series when
    /// calibration is configured.
    pub fn run(&self, raster: &Raster) -> DigitizerResult<ExtractionRun> {
        let path = self.extract_path(raster)?;

        let series = match &self.calibration {
            Some(calibration) => {
                let (value_map, time_map) = calibration.build_maps()?;
                Some(CalibratedSeries::from_path(&path, &value_map, &time_map)?)
            }
            None => None,
        };

        debug!(
            columns = path.len(),
            calibrated = series.is_some(),
            "extraction run complete"
        );

        Ok(ExtractionRun { path, series })
    }
}

/// Output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRun {
    pub path: PixelPath,
    pub series: Option<CalibratedSeries>,
}

impl ExtractionRun {
    /// Pretty JSON snapshot of the run for diagnostics and golden files.
    pub fn snapshot_json_pretty(&self) -> DigitizerResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| DigitizerError::InvalidData(format!("snapshot failed: {err}")))
    }
}
