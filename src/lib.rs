//! digitize-rs: chart-image curve extraction and calibration engine.
//!
//! Turns a decoded chart raster into an ordered (date, value) series by
//! matching an operator-picked color, reducing each column's matches to a
//! median pixel row, interpolating hole columns, optionally smoothing, and
//! mapping the result through two-anchor axis calibration (linear or
//! logarithmic Y, linear-in-time X).
//!
//! The interactive UI, batch folder iteration, and CSV writing are external
//! collaborators: they assemble the engine's inputs and consume its output.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{CalibrationConfig, DigitizerEngine, ExtractionConfig, ExtractionRun};
pub use error::{DigitizerError, DigitizerResult};
