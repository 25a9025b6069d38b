use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::calibrate::{TimeAxisMap, ValueAxisMap};
use crate::core::path::PixelPath;
use crate::error::DigitizerResult;

/// One calibrated output sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSample {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered (date, value) sequence, one sample per scanned column.
///
/// This is the engine's output artifact; the caller owns it once returned and
/// typically hands it to a downstream CSV writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedSeries {
    samples: Vec<SeriesSample>,
}

impl CalibratedSeries {
    /// Applies both axis maps column-wise to a filled pixel path.
    ///
    /// Values are rounded to 4 decimal places for output stability; the axis
    /// maps themselves stay exact.
    pub fn from_path(
        path: &PixelPath,
        value_map: &ValueAxisMap,
        time_map: &TimeAxisMap,
    ) -> DigitizerResult<Self> {
        let mut samples = Vec::with_capacity(path.len());

        for (col, &row) in path.rows().iter().enumerate() {
            samples.push(SeriesSample {
                date: time_map.date_at(col as f64)?,
                value: round_to_4dp(value_map.value_at(row)),
            });
        }

        Ok(Self { samples })
    }

    #[must_use]
    pub fn samples(&self) -> &[SeriesSample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn into_samples(self) -> Vec<SeriesSample> {
        self.samples
    }
}

fn round_to_4dp(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
