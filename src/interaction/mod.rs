//! Click-session state machine for anchor picking.
//!
//! The interactive calibration cycle (click first anchor, click second,
//! keep clicking to adjust, undo, confirm) lives here so the engine itself
//! stays stateless across clicks: a session ultimately hands over exactly one
//! pixel pair per axis, which the caller combines with the operator-entered
//! real values into a [`crate::core::ValueAnchor`] or
//! [`crate::core::DateAnchor`] pair.

use serde::{Deserialize, Serialize};

use crate::error::{DigitizerError, DigitizerResult};

/// Where the session currently is in the picking cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// The next click lands on the first anchor slot.
    PickingFirst,
    /// The next click lands on the second anchor slot.
    PickingSecond,
    /// Both anchors confirmed; clicks are rejected until `reopen`/`reset`.
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum ClickAction {
    Added { slot: usize },
    Replaced { slot: usize, previous: f64 },
}

/// Repeating two-slot click cycle with replacement, undo, and confirm.
///
/// Clicks alternate between the two anchor slots; once a slot holds a value,
/// a later click in its turn replaces it (the original digitizer's
/// Y1, Y2, Y1, Y2, ... adjustment loop). Undo restores the replaced
/// coordinate or removes the added one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorSession {
    slots: [Option<f64>; 2],
    click_count: usize,
    confirmed: bool,
    undo_stack: Vec<ClickAction>,
}

impl AnchorSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.confirmed {
            SessionPhase::Confirmed
        } else if self.click_count % 2 == 0 {
            SessionPhase::PickingFirst
        } else {
            SessionPhase::PickingSecond
        }
    }

    /// Pixel coordinates picked so far (first slot, second slot).
    #[must_use]
    pub fn picked(&self) -> (Option<f64>, Option<f64>) {
        (self.slots[0], self.slots[1])
    }

    /// Records a click, returning the slot index it landed on.
    pub fn click(&mut self, pixel: f64) -> DigitizerResult<usize> {
        if self.confirmed {
            return Err(DigitizerError::InvalidData(
                "anchor session is already confirmed".to_owned(),
            ));
        }
        if !pixel.is_finite() {
            return Err(DigitizerError::InvalidData(
                "anchor pixel must be finite".to_owned(),
            ));
        }

        let slot = self.click_count % 2;
        match self.slots[slot].replace(pixel) {
            Some(previous) => self.undo_stack.push(ClickAction::Replaced { slot, previous }),
            None => self.undo_stack.push(ClickAction::Added { slot }),
        }
        self.click_count += 1;
        Ok(slot)
    }

    /// Reverts the most recent click, or reopens a confirmed session.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.confirmed {
            self.confirmed = false;
            return true;
        }

        let Some(action) = self.undo_stack.pop() else {
            return false;
        };

        match action {
            ClickAction::Added { slot } => {
                self.slots[slot] = None;
            }
            ClickAction::Replaced { slot, previous } => {
                self.slots[slot] = Some(previous);
            }
        }
        self.click_count -= 1;
        true
    }

    /// Locks the session and yields the two picked pixel coordinates.
    pub fn confirm(&mut self) -> DigitizerResult<(f64, f64)> {
        match (self.slots[0], self.slots[1]) {
            (Some(first), Some(second)) => {
                self.confirmed = true;
                Ok((first, second))
            }
            _ => Err(DigitizerError::Calibration(
                "fewer than two anchors picked for this axis".to_owned(),
            )),
        }
    }

    /// Discards all clicks and starts the cycle over.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
