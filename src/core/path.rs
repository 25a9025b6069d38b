use serde::{Deserialize, Serialize};

use crate::core::scan::ColumnRows;
use crate::error::{DigitizerError, DigitizerResult};

/// Per-column reduction of the match sets: a resolved median row or a hole.
///
/// Produced fresh on every extraction run and never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPath {
    entries: Vec<Option<f64>>,
}

impl RawPath {
    #[must_use]
    pub fn entries(&self) -> &[Option<f64>] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_none()).count()
    }

    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.entries.len() - self.hole_count()
    }
}

/// Hole-free pixel-row path, one entry per image column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelPath {
    rows: Vec<f64>,
}

impl PixelPath {
    pub(crate) fn from_rows(rows: Vec<f64>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[f64] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reduces each column's match set to its standard median row.
///
/// The median ignores stray matches (antialiasing fringes, gridlines sharing
/// the target color) without the mean's sensitivity to outliers. Even-sized
/// sets average the two middle rows; the result is kept as an exact
/// fractional row since downstream stages interpolate in fractional pixel
/// space anyway. Empty sets become holes.
#[must_use]
pub fn build_median_path(columns: &[ColumnRows]) -> RawPath {
    let entries = columns
        .iter()
        .map(|rows| {
            if rows.is_empty() {
                None
            } else {
                Some(median_of(rows))
            }
        })
        .collect();

    RawPath { entries }
}

fn median_of(rows: &ColumnRows) -> f64 {
    let mut sorted: Vec<u32> = rows.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    if n % 2 == 1 {
        f64::from(sorted[n / 2])
    } else {
        (f64::from(sorted[n / 2 - 1]) + f64::from(sorted[n / 2])) / 2.0
    }
}

/// Interpolates hole columns from their resolved neighbors.
///
/// Interior hole runs are filled linearly between the bounding resolved rows;
/// leading and trailing holes hold the nearest resolved row constant, so
/// every scanned column ends up with a value. A path with no resolved column
/// at all fails with [`DigitizerError::EmptyMatch`].
pub fn fill_gaps(path: &RawPath) -> DigitizerResult<PixelPath> {
    if path.resolved_count() == 0 {
        return Err(DigitizerError::EmptyMatch);
    }

    let entries = path.entries();
    let mut rows = vec![0.0f64; entries.len()];

    let first_resolved = entries
        .iter()
        .position(|entry| entry.is_some())
        .expect("resolved_count > 0");
    let last_resolved = entries
        .iter()
        .rposition(|entry| entry.is_some())
        .expect("resolved_count > 0");

    // Leading and trailing holes: nearest-neighbor extrapolation.
    let first_row = entries[first_resolved].expect("resolved entry");
    let last_row = entries[last_resolved].expect("resolved entry");
    rows[..first_resolved].fill(first_row);
    rows[last_resolved..].fill(last_row);

    let mut prev_resolved = first_resolved;
    rows[first_resolved] = first_row;

    for col in (first_resolved + 1)..=last_resolved {
        let Some(row) = entries[col] else {
            continue;
        };
        rows[col] = row;

        let gap = col - prev_resolved;
        if gap > 1 {
            let start_row = rows[prev_resolved];
            let step = (row - start_row) / gap as f64;
            for (offset, slot) in rows[prev_resolved + 1..col].iter_mut().enumerate() {
                *slot = start_row + step * (offset + 1) as f64;
            }
        }

        prev_resolved = col;
    }

    Ok(PixelPath::from_rows(rows))
}
