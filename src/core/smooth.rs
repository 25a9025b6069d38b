use serde::{Deserialize, Serialize};

use crate::error::{DigitizerError, DigitizerResult};

/// Default moving-average window width.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Low-pass filter applied to the filled pixel path.
///
/// Both methods preserve sequence length: edges use a symmetrically shrinking
/// window instead of padding with out-of-range data. Windows must be odd so
/// the filter stays centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmoothingMethod {
    /// Plain symmetric moving average.
    MovingAverage { window: usize },
    /// Quadratic Savitzky-Golay smoothing, which preserves local curvature
    /// better than a plain average at the same window width.
    SavitzkyGolay { window: usize },
}

impl Default for SmoothingMethod {
    fn default() -> Self {
        Self::MovingAverage {
            window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

impl SmoothingMethod {
    pub(crate) fn validate(&self) -> DigitizerResult<()> {
        match *self {
            Self::MovingAverage { window } => {
                if window == 0 || window % 2 == 0 {
                    return Err(DigitizerError::InvalidData(format!(
                        "moving-average window must be odd and >= 1, got {window}"
                    )));
                }
            }
            Self::SavitzkyGolay { window } => {
                if window < 5 || window % 2 == 0 {
                    return Err(DigitizerError::InvalidData(format!(
                        "savitzky-golay window must be odd and >= 5, got {window}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Filters `rows`, returning a sequence of the same length.
    pub fn apply(&self, rows: &[f64]) -> DigitizerResult<Vec<f64>> {
        self.validate()?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        match *self {
            Self::MovingAverage { window } => Ok(moving_average(rows, window)),
            Self::SavitzkyGolay { window } => Ok(savitzky_golay(rows, window)),
        }
    }
}

fn moving_average(rows: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    let last = rows.len() - 1;

    (0..rows.len())
        .map(|i| {
            let reach = half.min(i).min(last - i);
            let slice = &rows[i - reach..=i + reach];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

fn savitzky_golay(rows: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    let last = rows.len() - 1;

    (0..rows.len())
        .map(|i| {
            let reach = half.min(i).min(last - i);
            if reach < 2 {
                // Too close to an edge for a quadratic fit: fall back to the
                // shrunken plain average.
                let slice = &rows[i - reach..=i + reach];
                return slice.iter().sum::<f64>() / slice.len() as f64;
            }

            let m = 2 * reach + 1;
            (-(reach as isize)..=reach as isize)
                .map(|j| quadratic_weight(m, j) * rows[(i as isize + j) as usize])
                .sum()
        })
        .collect()
}

/// Closed-form Savitzky-Golay smoothing weight for a quadratic fit over an
/// odd window of length `m`. For `m = 5` this yields (-3, 12, 17, 12, -3)/35.
fn quadratic_weight(m: usize, j: isize) -> f64 {
    let m = m as f64;
    let numerator = (3.0 * m * m - 7.0 - 20.0 * (j * j) as f64) / 4.0;
    let denominator = m * (m * m - 4.0) / 3.0;
    numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::{SmoothingMethod, quadratic_weight};

    #[test]
    fn output_length_matches_input_length() {
        let rows: Vec<f64> = (0..17).map(f64::from).collect();

        for method in [
            SmoothingMethod::MovingAverage { window: 5 },
            SmoothingMethod::SavitzkyGolay { window: 7 },
        ] {
            let out = method.apply(&rows).expect("valid window");
            assert_eq!(out.len(), rows.len());
        }
    }

    #[test]
    fn moving_average_flattens_a_spike() {
        let rows = vec![4.0, 4.0, 10.0, 4.0, 4.0];
        let out = SmoothingMethod::MovingAverage { window: 3 }
            .apply(&rows)
            .expect("valid window");

        assert_eq!(out[2], 6.0);
        // Edges shrink to the available symmetric neighborhood.
        assert_eq!(out[0], 4.0);
        assert_eq!(out[4], 4.0);
    }

    #[test]
    fn savitzky_golay_reproduces_a_quadratic_exactly() {
        let rows: Vec<f64> = (0..11).map(|i| {
            let x = f64::from(i);
            0.5 * x * x - 3.0 * x + 2.0
        })
        .collect();

        let out = SmoothingMethod::SavitzkyGolay { window: 5 }
            .apply(&rows)
            .expect("valid window");

        for (smoothed, original) in out.iter().zip(&rows).skip(2).take(rows.len() - 4) {
            assert!((smoothed - original).abs() <= 1e-9);
        }
    }

    #[test]
    fn classic_five_point_weights() {
        let expected = [-3.0 / 35.0, 12.0 / 35.0, 17.0 / 35.0, 12.0 / 35.0, -3.0 / 35.0];
        for (j, want) in (-2isize..=2).zip(expected) {
            assert!((quadratic_weight(5, j) - want).abs() <= 1e-12);
        }
    }

    #[test]
    fn even_windows_are_rejected() {
        assert!(SmoothingMethod::MovingAverage { window: 4 }
            .apply(&[1.0, 2.0])
            .is_err());
        assert!(SmoothingMethod::SavitzkyGolay { window: 3 }
            .apply(&[1.0, 2.0])
            .is_err());
    }
}
