//! Binary morphology over the match mask.
//!
//! Chart strokes dithered by antialiasing leave pinholes in the raw match
//! mask; a hole-filling pass seals enclosed background regions (hollow
//! markers, filled-area outlines) and a closing pass (dilate then erode)
//! seals the remaining pinholes before the median reduction. Both are opt-in
//! and off by default, so the raw scan semantics stay untouched unless the
//! caller asks for cleanup.

use crate::core::scan::MatchMask;
use crate::error::{DigitizerError, DigitizerResult};

/// Morphological closing with a square structuring element.
///
/// `element_side` must be odd and at least 3. Neighborhoods are clipped at
/// the mask border rather than padded.
pub fn close_mask(mask: &MatchMask, element_side: usize) -> DigitizerResult<MatchMask> {
    validate_element_side(element_side)?;
    let dilated = dilate(mask, element_side);
    Ok(erode(&dilated, element_side))
}

/// Fills enclosed unmatched regions of the mask.
///
/// Flood-fills the unmatched background from the mask border (4-connected);
/// any unmatched region unreachable from the border is interior to a matched
/// shape and becomes matched. Closing with a small element cannot seal such
/// regions, so this runs as its own pass, before any closing.
#[must_use]
pub fn fill_mask_holes(mask: &MatchMask) -> MatchMask {
    let width = mask.width();
    let height = mask.height();
    if width == 0 || height == 0 {
        return mask.clone();
    }

    let mut outside = vec![false; width * height];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for col in 0..width {
        stack.push((col, 0));
        stack.push((col, height - 1));
    }
    for row in 0..height {
        stack.push((0, row));
        stack.push((width - 1, row));
    }

    while let Some((col, row)) = stack.pop() {
        let index = row * width + col;
        if outside[index] || mask.get(col, row) {
            continue;
        }
        outside[index] = true;

        if col > 0 {
            stack.push((col - 1, row));
        }
        if col + 1 < width {
            stack.push((col + 1, row));
        }
        if row > 0 {
            stack.push((col, row - 1));
        }
        if row + 1 < height {
            stack.push((col, row + 1));
        }
    }

    let mut out = MatchMask::new_fill(width, height, mask.row_offset(), true);
    for row in 0..height {
        for col in 0..width {
            if outside[row * width + col] {
                out.set(col, row, false);
            }
        }
    }

    out
}

pub(crate) fn validate_element_side(element_side: usize) -> DigitizerResult<()> {
    if element_side < 3 || element_side % 2 == 0 {
        return Err(DigitizerError::InvalidData(format!(
            "mask closing element side must be odd and >= 3, got {element_side}"
        )));
    }
    Ok(())
}

fn dilate(mask: &MatchMask, element_side: usize) -> MatchMask {
    let half = (element_side / 2) as isize;
    let mut out = MatchMask::new_fill(mask.width(), mask.height(), mask.row_offset(), false);

    for row in 0..mask.height() {
        for col in 0..mask.width() {
            if any_in_neighborhood(mask, col, row, half, true) {
                out.set(col, row, true);
            }
        }
    }

    out
}

fn erode(mask: &MatchMask, element_side: usize) -> MatchMask {
    let half = (element_side / 2) as isize;
    let mut out = MatchMask::new_fill(mask.width(), mask.height(), mask.row_offset(), false);

    for row in 0..mask.height() {
        for col in 0..mask.width() {
            if !any_in_neighborhood(mask, col, row, half, false) {
                out.set(col, row, true);
            }
        }
    }

    out
}

/// Scans the clipped neighborhood of `(col, row)` for a pixel equal to `needle`.
fn any_in_neighborhood(
    mask: &MatchMask,
    col: usize,
    row: usize,
    half: isize,
    needle: bool,
) -> bool {
    for dy in -half..=half {
        let neighbor_row = row as isize + dy;
        if neighbor_row < 0 || neighbor_row >= mask.height() as isize {
            continue;
        }

        for dx in -half..=half {
            let neighbor_col = col as isize + dx;
            if neighbor_col < 0 || neighbor_col >= mask.width() as isize {
                continue;
            }

            if mask.get(neighbor_col as usize, neighbor_row as usize) == needle {
                return true;
            }
        }
    }

    false
}
