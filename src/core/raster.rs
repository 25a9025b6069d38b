use serde::{Deserialize, Serialize};

use crate::error::{DigitizerError, DigitizerResult};

/// One image pixel as an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// Decoded chart image supplied by the caller.
///
/// Row-major pixel grid addressed by `(column, row)` with `(0, 0)` at the
/// top-left corner. The engine never mutates it; format decoding is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// Wraps a row-major pixel buffer, validating its size.
    pub fn from_vec(width: usize, height: usize, pixels: Vec<Rgb>) -> DigitizerResult<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            DigitizerError::InvalidData("raster dimensions overflow".to_owned())
        })?;

        if pixels.len() != expected {
            return Err(DigitizerError::InvalidData(format!(
                "raster buffer length {} does not match {width}x{height}",
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a raster by evaluating `f(column, row)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> DigitizerResult<Self>
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let expected = width.checked_mul(height).ok_or_else(|| {
            DigitizerError::InvalidData("raster dimensions overflow".to_owned())
        })?;

        let mut pixels = Vec::with_capacity(expected);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(col, row));
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<Rgb> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.pixels[row * self.width + col])
    }

    /// Returns one full image row.
    ///
    /// # Panics
    /// Panics when `row >= height`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Rgb] {
        assert!(row < self.height, "row index out of bounds");
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }
}
