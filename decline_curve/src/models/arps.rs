//! Closed forms of the Arps decline family

use crate::error::{DeclineError, Result};
use crate::models::DeclineMode;
use decline_math::LinearRegression;

/// Exponent of the general hyperbolic form, strictly between 0 and 1
///
/// Only [`Arps::hyperbolic`] and [`Arps::from_exponent`] build one, so the
/// general formulas never see the singular exponents 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HyperbolicExponent(f64);

impl HyperbolicExponent {
    /// Exponent value
    pub fn get(self) -> f64 {
        self.0
    }
}

/// One member of the Arps family
///
/// Exponential and harmonic decline are the `b -> 0` and `b -> 1` limits of
/// the hyperbolic form, where that form is undefined. Each keeps its own
/// variant so those limits are never evaluated through the general formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arps {
    Exponential,
    Hyperbolic(HyperbolicExponent),
    Harmonic,
}

impl Arps {
    /// Family selected by the decline exponent
    pub fn from_exponent(b: f64) -> Result<Self> {
        check_exponent(b)?;

        Ok(match DeclineMode::from_exponent(b) {
            DeclineMode::Exponential => Arps::Exponential,
            DeclineMode::Hyperbolic => Arps::Hyperbolic(HyperbolicExponent(b)),
            DeclineMode::Harmonic => Arps::Harmonic,
        })
    }

    /// General hyperbolic form; rejects the singular exponents 0 and 1
    pub fn hyperbolic(b: f64) -> Result<Self> {
        check_exponent(b)?;

        if b == 0.0 || b == 1.0 {
            return Err(DeclineError::ArithmeticSingularity(format!(
                "Hyperbolic form is undefined at b = {}; use the {} limit",
                b,
                DeclineMode::from_exponent(b)
            )));
        }

        Ok(Arps::Hyperbolic(HyperbolicExponent(b)))
    }

    /// Decline exponent
    pub fn exponent(&self) -> f64 {
        match *self {
            Arps::Exponential => 0.0,
            Arps::Hyperbolic(b) => b.get(),
            Arps::Harmonic => 1.0,
        }
    }

    /// Named mode of this family
    pub fn mode(&self) -> DeclineMode {
        match self {
            Arps::Exponential => DeclineMode::Exponential,
            Arps::Hyperbolic(_) => DeclineMode::Hyperbolic,
            Arps::Harmonic => DeclineMode::Harmonic,
        }
    }

    /// Rate after elapsed time `t` from the origin
    pub fn rate(&self, di: f64, yi: f64, t: f64) -> f64 {
        match *self {
            // q = qi * exp(-Di*t)
            Arps::Exponential => yi * (-di * t).exp(),
            // q = qi / (1+b*Di*t)^(1/b)
            Arps::Hyperbolic(HyperbolicExponent(b)) => yi / (1.0 + b * di * t).powf(1.0 / b),
            // q = qi / (1+Di*t)
            Arps::Harmonic => yi / (1.0 + di * t),
        }
    }

    /// Cumulative volume after elapsed time `t` from the origin
    pub fn cumulative(&self, di: f64, yi: f64, t: f64) -> Result<f64> {
        if di == 0.0 {
            return Err(DeclineError::ArithmeticSingularity(
                "Cumulative volume is undefined for a zero decline rate".to_string(),
            ));
        }

        Ok(match *self {
            // Np = qi/Di * (1-exp(-Di*t))
            Arps::Exponential => (yi / di) * (1.0 - (-di * t).exp()),
            // Np = qi/((1-b)*Di) * (1-(1+b*Di*t)^(1-1/b))
            Arps::Hyperbolic(HyperbolicExponent(b)) => {
                (yi / di) / (1.0 - b) * (1.0 - (1.0 + b * di * t).powf(1.0 - 1.0 / b))
            }
            // Np = qi/Di * ln(1+Di*t)
            Arps::Harmonic => (yi / di) * (1.0 + di * t).ln(),
        })
    }

    /// Transform a rate onto the scale where the family is linear in time
    pub fn linearize(&self, y: f64) -> f64 {
        match *self {
            Arps::Exponential => y.ln(),
            Arps::Hyperbolic(HyperbolicExponent(b)) => y.powf(-b),
            Arps::Harmonic => 1.0 / y,
        }
    }

    /// Decline rate and initial rate recovered from the linear fit
    pub fn inverse(&self, linear: &LinearRegression) -> (f64, f64) {
        let (m, c) = (linear.slope, linear.intercept);

        match *self {
            Arps::Exponential => (-m, c.exp()),
            Arps::Hyperbolic(HyperbolicExponent(b)) => (m / (c * b), c.powf(-1.0 / b)),
            Arps::Harmonic => (m / c, 1.0 / c),
        }
    }

    /// Standard errors of the recovered decline rate and initial rate
    ///
    /// First-order propagation of the slope/intercept covariance matrix
    /// through [`Arps::inverse`].
    pub fn inverse_stderr(&self, linear: &LinearRegression) -> (f64, f64) {
        let (m, c) = (linear.slope, linear.intercept);
        let vm = linear.stderr * linear.stderr;
        let vc = linear.intercept_stderr * linear.intercept_stderr;
        let cov = linear.covariance;

        match *self {
            Arps::Exponential => (linear.stderr, c.exp() * linear.intercept_stderr),
            Arps::Hyperbolic(HyperbolicExponent(b)) => reciprocal_stderr(m, c, b, vm, vc, cov),
            Arps::Harmonic => reciprocal_stderr(m, c, 1.0, vm, vc, cov),
        }
    }
}

fn check_exponent(b: f64) -> Result<()> {
    if !b.is_finite() || !(0.0..=1.0).contains(&b) {
        return Err(DeclineError::InvalidParameter(format!(
            "Decline exponent must be between 0 and 1, got {}",
            b
        )));
    }

    Ok(())
}

// Di = m/(c*b), yi = c^(-1/b)
fn reciprocal_stderr(m: f64, c: f64, b: f64, vm: f64, vc: f64, cov: f64) -> (f64, f64) {
    let dm = 1.0 / (c * b);
    let dc = -m / (c * c * b);
    let di_var = dm * dm * vm + dc * dc * vc + 2.0 * dm * dc * cov;

    let dy = -(1.0 / b) * c.powf(-1.0 / b - 1.0);
    let yi_var = dy * dy * vc;

    (di_var.max(0.0).sqrt(), yi_var.max(0.0).sqrt())
}
