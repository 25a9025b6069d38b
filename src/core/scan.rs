use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::color::ColorSpec;
use crate::core::raster::Raster;
use crate::error::{DigitizerError, DigitizerResult};

/// Matched row indices for one image column.
pub type ColumnRows = SmallVec<[u32; 8]>;

/// Optional vertical scan constraint, inclusive on both rows.
///
/// `upper_row < lower_row` is enforced at construction; a deserialized value
/// is re-checked by the engine before any run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    upper_row: usize,
    lower_row: usize,
}

impl Bounds {
    /// Creates vertical bounds, rejecting an inverted or empty pair.
    pub fn new(upper_row: usize, lower_row: usize) -> DigitizerResult<Self> {
        if upper_row >= lower_row {
            return Err(DigitizerError::Bounds {
                upper: upper_row,
                lower: lower_row,
            });
        }

        Ok(Self {
            upper_row,
            lower_row,
        })
    }

    #[must_use]
    pub fn upper_row(&self) -> usize {
        self.upper_row
    }

    #[must_use]
    pub fn lower_row(&self) -> usize {
        self.lower_row
    }

    pub(crate) fn validate(&self) -> DigitizerResult<()> {
        if self.upper_row >= self.lower_row {
            return Err(DigitizerError::Bounds {
                upper: self.upper_row,
                lower: self.lower_row,
            });
        }
        Ok(())
    }
}

/// Binary match mask over the scanned region of an image.
///
/// Covers every image column and the row band selected by [`Bounds`]
/// (full height when absent). Row addressing inside the mask is relative;
/// [`MatchMask::row_offset`] converts back to absolute image rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchMask {
    width: usize,
    height: usize,
    row_offset: usize,
    data: Vec<bool>,
}

impl MatchMask {
    pub(crate) fn new_fill(width: usize, height: usize, row_offset: usize, value: bool) -> Self {
        Self {
            width,
            height,
            row_offset,
            data: vec![value; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows covered by the scan band.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Absolute image row of the mask's first row.
    #[must_use]
    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// Returns whether the pixel at `(col, band_row)` matched.
    ///
    /// # Panics
    /// Panics when `col >= width` or `band_row >= height`.
    #[must_use]
    pub fn get(&self, col: usize, band_row: usize) -> bool {
        assert!(
            col < self.width && band_row < self.height,
            "mask index out of bounds"
        );
        self.data[band_row * self.width + col]
    }

    pub(crate) fn set(&mut self, col: usize, band_row: usize, value: bool) {
        self.data[band_row * self.width + col] = value;
    }

    /// Total number of set pixels.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.data.iter().filter(|&&set| set).count()
    }

    /// Collects the matched rows of every column, in absolute image rows.
    ///
    /// The result has one entry per image column; rows within a column are
    /// ascending because the mask is walked top-to-bottom.
    #[must_use]
    pub fn column_rows(&self) -> Vec<ColumnRows> {
        let mut columns = vec![ColumnRows::new(); self.width];
        for band_row in 0..self.height {
            let row_base = band_row * self.width;
            for (col, entry) in columns.iter_mut().enumerate() {
                if self.data[row_base + col] {
                    entry.push((band_row + self.row_offset) as u32);
                }
            }
        }
        columns
    }
}

/// Applies the color matcher across the image within optional bounds.
///
/// Scanning is column-major, top-to-bottom within a column; order is
/// irrelevant to the result since the full match set is collected before any
/// reduction. Bounds reaching past the image bottom are clamped; a band that
/// starts below the image yields an empty-height mask.
#[must_use]
pub fn scan_mask(raster: &Raster, spec: &ColorSpec, bounds: Option<&Bounds>) -> MatchMask {
    let (row_start, row_end) = match bounds {
        Some(bounds) => (
            bounds.upper_row().min(raster.height()),
            bounds.lower_row().saturating_add(1).min(raster.height()),
        ),
        None => (0, raster.height()),
    };

    let band_height = row_end.saturating_sub(row_start);
    let mut mask = MatchMask::new_fill(raster.width(), band_height, row_start, false);

    for band_row in 0..band_height {
        let pixels = raster.row(row_start + band_row);
        for (col, &pixel) in pixels.iter().enumerate() {
            if spec.matches(pixel) {
                mask.set(col, band_row, true);
            }
        }
    }

    mask
}
