use chrono::format::{Parsed, StrftimeItems};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DigitizerError, DigitizerResult};

/// Mapping mode used by the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisScaleMode {
    /// Uniform spacing in raw value units.
    #[default]
    Linear,
    /// Uniform spacing in natural-log value units (all values must be > 0).
    Log,
}

/// One Y-axis reference click: a pixel row paired with the real value it marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAnchor {
    pub pixel: f64,
    pub value: f64,
}

impl ValueAnchor {
    #[must_use]
    pub fn new(pixel: f64, value: f64) -> Self {
        Self { pixel, value }
    }
}

/// One X-axis reference click: a pixel column paired with a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateAnchor {
    pub pixel: f64,
    pub date: NaiveDate,
}

impl DateAnchor {
    #[must_use]
    pub fn new(pixel: f64, date: NaiveDate) -> Self {
        Self { pixel, date }
    }
}

/// Pixel-row to real-value map built from two anchors.
///
/// Linear mode interpolates directly; log mode performs the same
/// interpolation in ln space and exponentiates on the way out, mirroring how
/// chart price scales transform between raw and display domains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxisMap {
    pixel_origin: f64,
    transformed_origin: f64,
    slope: f64,
    mode: AxisScaleMode,
}

impl ValueAxisMap {
    /// Builds the map, rejecting degenerate or out-of-domain anchors.
    pub fn from_anchors(
        first: ValueAnchor,
        second: ValueAnchor,
        mode: AxisScaleMode,
    ) -> DigitizerResult<Self> {
        for anchor in [first, second] {
            if !anchor.pixel.is_finite() || !anchor.value.is_finite() {
                return Err(DigitizerError::Calibration(
                    "value anchors must be finite".to_owned(),
                ));
            }
        }

        if first.pixel == second.pixel {
            return Err(DigitizerError::Calibration(
                "value anchor pixels must differ".to_owned(),
            ));
        }

        let transformed_first = to_transformed(first.value, mode)?;
        let transformed_second = to_transformed(second.value, mode)?;

        Ok(Self {
            pixel_origin: first.pixel,
            transformed_origin: transformed_first,
            slope: (transformed_second - transformed_first) / (second.pixel - first.pixel),
            mode,
        })
    }

    #[must_use]
    pub fn mode(&self) -> AxisScaleMode {
        self.mode
    }

    /// Maps a pixel row to its real value.
    #[must_use]
    pub fn value_at(&self, pixel_row: f64) -> f64 {
        let transformed = self.transformed_origin + self.slope * (pixel_row - self.pixel_origin);
        match self.mode {
            AxisScaleMode::Linear => transformed,
            AxisScaleMode::Log => transformed.exp(),
        }
    }

    /// Inverse map: the pixel row at which `value` sits.
    ///
    /// Fails when the two anchors carried equal values (zero slope) or when
    /// `value` is outside the mode's domain.
    pub fn pixel_at(&self, value: f64) -> DigitizerResult<f64> {
        if self.slope == 0.0 {
            return Err(DigitizerError::Calibration(
                "value axis with equal anchor values cannot be inverted".to_owned(),
            ));
        }

        let transformed = to_transformed(value, self.mode)?;
        Ok(self.pixel_origin + (transformed - self.transformed_origin) / self.slope)
    }
}

fn to_transformed(value: f64, mode: AxisScaleMode) -> DigitizerResult<f64> {
    if !value.is_finite() {
        return Err(DigitizerError::Calibration(
            "value must be finite".to_owned(),
        ));
    }

    match mode {
        AxisScaleMode::Linear => Ok(value),
        AxisScaleMode::Log => {
            if value <= 0.0 {
                return Err(DigitizerError::Calibration(
                    "log value axis requires values > 0".to_owned(),
                ));
            }
            Ok(value.ln())
        }
    }
}

/// Pixel-column to calendar-date map built from two anchors.
///
/// Dates are carried on a numeric day-ordinal axis (days from the common
/// era); the pixel map is linear there, and results round to the nearest
/// whole day on the way back out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxisMap {
    pixel_origin: f64,
    ordinal_origin: f64,
    slope: f64,
}

impl TimeAxisMap {
    pub fn from_anchors(first: DateAnchor, second: DateAnchor) -> DigitizerResult<Self> {
        if !first.pixel.is_finite() || !second.pixel.is_finite() {
            return Err(DigitizerError::Calibration(
                "date anchor pixels must be finite".to_owned(),
            ));
        }

        if first.pixel == second.pixel {
            return Err(DigitizerError::Calibration(
                "date anchor pixels must differ".to_owned(),
            ));
        }

        let ordinal_first = f64::from(first.date.num_days_from_ce());
        let ordinal_second = f64::from(second.date.num_days_from_ce());

        Ok(Self {
            pixel_origin: first.pixel,
            ordinal_origin: ordinal_first,
            slope: (ordinal_second - ordinal_first) / (second.pixel - first.pixel),
        })
    }

    /// Maps a pixel column to the nearest calendar date.
    pub fn date_at(&self, pixel_col: f64) -> DigitizerResult<NaiveDate> {
        let ordinal = self.ordinal_origin + self.slope * (pixel_col - self.pixel_origin);
        if !ordinal.is_finite() || ordinal < f64::from(i32::MIN) || ordinal > f64::from(i32::MAX) {
            return Err(DigitizerError::Calibration(format!(
                "pixel column {pixel_col} maps outside the supported date range"
            )));
        }

        let days = ordinal.round() as i32;
        NaiveDate::from_num_days_from_ce_opt(days).ok_or_else(|| {
            DigitizerError::Calibration(format!(
                "pixel column {pixel_col} maps outside the supported date range"
            ))
        })
    }

    /// Inverse map: the fractional pixel column of a date.
    pub fn pixel_at(&self, date: NaiveDate) -> DigitizerResult<f64> {
        if self.slope == 0.0 {
            return Err(DigitizerError::Calibration(
                "time axis with equal anchor dates cannot be inverted".to_owned(),
            ));
        }

        let ordinal = f64::from(date.num_days_from_ce());
        Ok(self.pixel_origin + (ordinal - self.ordinal_origin) / self.slope)
    }
}

const FULL_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const MONTH_DATE_FORMATS: [&str; 2] = ["%Y-%m", "%Y/%m"];

/// Parses operator-entered anchor dates.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM`, `YYYY/MM/DD`, and `YYYY/MM`; month-only
/// forms resolve to the first day of that month.
pub fn parse_flexible_date(input: &str) -> DigitizerResult<NaiveDate> {
    let trimmed = input.trim();

    for format in FULL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    for format in MONTH_DATE_FORMATS {
        let mut parsed = Parsed::new();
        if chrono::format::parse(&mut parsed, trimmed, StrftimeItems::new(format)).is_ok()
            && parsed.set_day(1).is_ok()
        {
            if let Ok(date) = parsed.to_naive_date() {
                return Ok(date);
            }
        }
    }

    Err(DigitizerError::Calibration(format!(
        "cannot parse date '{trimmed}': use YYYY-MM or YYYY-MM-DD"
    )))
}
