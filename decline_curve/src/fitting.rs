//! Linearized least squares fitting of decline families
//!
//! Each family becomes a straight line in elapsed time after transforming
//! the rates (`ln y`, `y^-b`, `1/y`). The line is fitted by ordinary least
//! squares and transformed back into `(Di, yi)`. R² is then computed on the
//! original rate scale; the linear fit's own R² lives on the transformed
//! scale and is not used to compare families.

use crate::error::{DeclineError, Result};
use crate::models::{Arps, DeclineModel};
use chrono::NaiveDate;
use decline_math::{percentile, rsquared, LinearRegression};
use tracing::{debug, warn};

/// Decline parameters recovered from a linear fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonLinearResult {
    /// Initial decline rate
    pub di: f64,
    /// Initial rate
    pub yi: f64,
    /// R² against the observed rates
    pub rsquared: f64,
    /// Standard error of the decline rate
    pub di_stderr: f64,
    /// Standard error of the initial rate
    pub yi_stderr: f64,
}

impl NonLinearResult {
    /// Zero-valued parameters reported when no fit exists
    pub fn sentinel() -> Self {
        Self {
            di: 0.0,
            yi: 0.0,
            rsquared: f64::NAN,
            di_stderr: f64::NAN,
            yi_stderr: f64::NAN,
        }
    }
}

/// Outcome of fitting one decline family
///
/// `nonlinear` is always derived from `linear`. When the regression could
/// not be computed, `linear` is `None`, `nonlinear` holds the sentinel and
/// `failure` says why; a zero-valued result is never a usable model.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionResult {
    /// Decline exponent of the fitted family
    pub b: f64,
    /// Origin offset the fit was shifted to
    pub xi: f64,
    /// Number of observations that entered the regression
    pub num: usize,
    pub linear: Option<LinearRegression>,
    pub nonlinear: NonLinearResult,
    pub failure: Option<DeclineError>,
}

impl RegressionResult {
    fn failed(arps: Arps, xi: f64, num: usize, failure: DeclineError) -> Self {
        Self {
            b: arps.exponent(),
            xi,
            num,
            linear: None,
            nonlinear: NonLinearResult::sentinel(),
            failure: Some(failure),
        }
    }

    /// Whether the result describes a fitted model
    pub fn is_usable(&self) -> bool {
        self.linear.is_some()
            && self.failure.is_none()
            && self.nonlinear.di.is_finite()
            && self.nonlinear.yi.is_finite()
    }

    /// Record a failure discovered after the regression itself succeeded
    pub fn reject(mut self, failure: DeclineError) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Model with the fitted parameters, anchored at `date0`
    pub fn model(&self, date0: NaiveDate) -> Result<DeclineModel> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }

        DeclineModel::new(self.b, self.nonlinear.di, self.nonlinear.yi, date0)?
            .with_origin(self.xi)
    }

    /// Decline rate at quantile `perc` of its sampling distribution
    pub fn di_percentile(&self, perc: f64) -> Result<f64> {
        self.check_usable()?;
        let nl = &self.nonlinear;
        Ok(percentile(nl.di, nl.di_stderr * nl.di_stderr, perc)?)
    }

    /// Initial rate at quantile `perc` of its sampling distribution
    pub fn yi_percentile(&self, perc: f64) -> Result<f64> {
        self.check_usable()?;
        let nl = &self.nonlinear;
        Ok(percentile(nl.yi, nl.yi_stderr * nl.yi_stderr, perc)?)
    }

    fn check_usable(&self) -> Result<()> {
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None if self.linear.is_none() => Err(DeclineError::InsufficientData(
                "No regression available".to_string(),
            )),
            None => Ok(()),
        }
    }
}

/// Fit `arps` to rates `y` observed at elapsed days `x`
///
/// With an origin `xi`, only observations at or after `xi` take part and
/// time is measured from `xi`. Rates that are not finite or not positive
/// are dropped first, the same points for every family. Regression failures
/// come back as a sentinel result; only mismatched inputs are an error.
pub fn regress(arps: Arps, x: &[f64], y: &[f64], xi: Option<f64>) -> Result<RegressionResult> {
    if x.len() != y.len() {
        return Err(DeclineError::InvalidParameter(format!(
            "Time length ({}) doesn't match rate length ({})",
            x.len(),
            y.len()
        )));
    }

    let shift = xi.unwrap_or(0.0);

    let (times, rates): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter(|(&xv, _)| xi.map_or(true, |xi| xv >= xi))
        .map(|(&xv, &yv)| (xv - shift, yv))
        .filter(|&(xv, yv)| xv.is_finite() && yv.is_finite() && yv > 0.0)
        .unzip();

    let linearized: Vec<f64> = rates.iter().map(|&yv| arps.linearize(yv)).collect();

    let linear = match LinearRegression::fit(&times, &linearized) {
        Ok(linear) => linear,
        Err(err) => {
            let failure = DeclineError::from(err);
            warn!(mode = %arps.mode(), points = times.len(), "decline regression failed: {}", failure);
            return Ok(RegressionResult::failed(arps, shift, times.len(), failure));
        }
    };

    let (di, yi) = arps.inverse(&linear);
    let (di_stderr, yi_stderr) = arps.inverse_stderr(&linear);

    let ycal: Vec<f64> = times.iter().map(|&t| arps.rate(di, yi, t)).collect();
    let r2 = rsquared(&ycal, &rates)?;

    debug!(mode = %arps.mode(), di, yi, rsquared = r2, points = times.len(), "decline regression");

    let failure = if di.is_finite() && yi.is_finite() {
        None
    } else {
        warn!(mode = %arps.mode(), di, yi, "decline parameters are not finite");
        Some(DeclineError::DegenerateRegression(format!(
            "Fitted parameters are not finite: Di = {}, yi = {}",
            di, yi
        )))
    };

    Ok(RegressionResult {
        b: arps.exponent(),
        xi: shift,
        num: times.len(),
        linear: Some(linear),
        nonlinear: NonLinearResult {
            di,
            yi,
            rsquared: r2,
            di_stderr,
            yi_stderr,
        },
        failure,
    })
}
