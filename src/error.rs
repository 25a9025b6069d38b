use thiserror::Error;

pub type DigitizerResult<T> = Result<T, DigitizerError>;

#[derive(Debug, Error)]
pub enum DigitizerError {
    #[error("no pixels matched the target color anywhere in the scan range")]
    EmptyMatch,

    #[error("invalid calibration: {0}")]
    Calibration(String),

    #[error("invalid bounds: upper row {upper} must be strictly above lower row {lower}")]
    Bounds { upper: usize, lower: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
