//! Ordinary least squares with one regressor
//!
//! Reports the quantities a decline fit needs downstream: slope, intercept,
//! correlation coefficient, the two-sided p-value of a zero-slope test and
//! the standard errors of both coefficients.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Keeps the t statistic finite when |r| reaches 1
const TINY: f64 = 1.0e-20;

/// Least squares fit of `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Slope of the regression line
    pub slope: f64,
    /// Intercept of the regression line
    pub intercept: f64,
    /// Pearson correlation coefficient
    pub rvalue: f64,
    /// Two-sided p-value for the hypothesis that the slope is zero
    pub pvalue: f64,
    /// Standard error of the slope
    pub stderr: f64,
    /// Standard error of the intercept
    pub intercept_stderr: f64,
    /// Covariance between the slope and intercept estimates
    pub covariance: f64,
    /// Number of observations used
    pub num: usize,
}

impl LinearRegression {
    /// Fit the regression line to paired observations
    ///
    /// Fails with `InsufficientData` for fewer than two pairs and with
    /// `CalculationError` when every x value is the same.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(MathError::InvalidInput(format!(
                "x length ({}) doesn't match y length ({})",
                x.len(),
                y.len()
            )));
        }

        if x.len() < 2 {
            return Err(MathError::InsufficientData(
                "Not enough data for regression. Need at least 2 points.".to_string(),
            ));
        }

        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Regression inputs must be finite".to_string(),
            ));
        }

        let n = x.len() as f64;

        // Calculate means
        let x_mean = x.iter().sum::<f64>() / n;
        let y_mean = y.iter().sum::<f64>() / n;

        // Centered sums of squares and cross products
        let mut sxx = 0.0;
        let mut syy = 0.0;
        let mut sxy = 0.0;

        for (&xv, &yv) in x.iter().zip(y.iter()) {
            let dx = xv - x_mean;
            let dy = yv - y_mean;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }

        let scale = x.iter().map(|v| v * v).sum::<f64>();
        if sxx <= 1e-12 * scale {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: all x values are identical".to_string(),
            ));
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let rvalue = if syy == 0.0 {
            0.0
        } else {
            (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
        };

        // Two points always lie on the line: no residual degrees of freedom
        if x.len() == 2 {
            let pvalue = if y[0] == y[1] { 1.0 } else { 0.0 };

            return Ok(Self {
                slope,
                intercept,
                rvalue,
                pvalue,
                stderr: 0.0,
                intercept_stderr: 0.0,
                covariance: 0.0,
                num: 2,
            });
        }

        let df = n - 2.0;

        let t = rvalue * (df / ((1.0 - rvalue + TINY) * (1.0 + rvalue + TINY))).sqrt();
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| MathError::CalculationError(e.to_string()))?;
        let pvalue = (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0);

        let stderr = ((1.0 - rvalue * rvalue) * syy / sxx / df).sqrt();
        let intercept_stderr = stderr * (sxx / n + x_mean * x_mean).sqrt();
        let covariance = -x_mean * stderr * stderr;

        Ok(Self {
            slope,
            intercept,
            rvalue,
            pvalue,
            stderr,
            intercept_stderr,
            covariance,
            num: x.len(),
        })
    }

    /// Value of the regression line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// R-squared of the fit on the regressed scale
    pub fn r_squared(&self) -> f64 {
        self.rvalue * self.rvalue
    }
}
