mod config;
mod engine;

pub use config::{CalibrationConfig, ExtractionConfig};
pub use engine::{DigitizerEngine, ExtractionRun};
