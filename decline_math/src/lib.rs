//! # Decline Math
//!
//! Numerical building blocks for decline-curve analysis.
//! This crate provides ordinary least squares on a single regressor,
//! a NaN-aware coefficient of determination and the normal-quantile
//! percentile transform used to turn a fitted parameter and its
//! variance into optimistic or pessimistic estimates.

use thiserror::Error;

pub mod regression;
pub mod stats;

pub use crate::regression::LinearRegression;
pub use crate::stats::{nanmean, percentile, rsquared};

/// Errors that can occur in regression and scoring calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for decline math operations
pub type Result<T> = std::result::Result<T, MathError>;
