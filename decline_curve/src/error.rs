//! Error types for the decline_curve crate

use decline_math::MathError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the decline_curve crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeclineError {
    /// Decline rate, exponent or mode name outside its domain
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Too few usable observations for a regression
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Singular or ill-conditioned least squares problem
    #[error("Degenerate regression: {0}")]
    DegenerateRegression(String),

    /// A closed form evaluated at one of its singular points
    #[error("Arithmetic singularity: {0}")]
    ArithmeticSingularity(String),

    /// Error related to input data layout or content
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DeclineError>;

impl From<MathError> for DeclineError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData(msg) => DeclineError::InsufficientData(msg),
            MathError::InvalidInput(msg) => DeclineError::InvalidParameter(msg),
            MathError::CalculationError(msg) => DeclineError::DegenerateRegression(msg),
        }
    }
}

impl From<PolarsError> for DeclineError {
    fn from(err: PolarsError) -> Self {
        DeclineError::PolarsError(err.to_string())
    }
}
