//! Goodness-of-fit and percentile helpers
//!
//! Both functions tolerate NaN entries in observed data the way production
//! records usually need: missing values are skipped, not propagated.

use crate::{MathError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Mean of the non-NaN entries, `None` when there are none
pub fn nanmean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, c), &v| (s + v, c + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Coefficient of determination of `ycal` against `yobs`
///
/// `R² = 1 - Σ(yobs - ycal)² / Σ(yobs - mean(yobs))²`, where a pair is left
/// out of both sums (and of the mean) when either side is NaN.
pub fn rsquared(ycal: &[f64], yobs: &[f64]) -> Result<f64> {
    if ycal.len() != yobs.len() {
        return Err(MathError::InvalidInput(format!(
            "Calculated length ({}) doesn't match observed length ({})",
            ycal.len(),
            yobs.len()
        )));
    }

    let pairs: Vec<(f64, f64)> = ycal
        .iter()
        .zip(yobs.iter())
        .filter(|(c, o)| !c.is_nan() && !o.is_nan())
        .map(|(&c, &o)| (c, o))
        .collect();

    let observed: Vec<f64> = pairs.iter().map(|&(_, o)| o).collect();
    let mean = nanmean(&observed).unwrap_or(f64::NAN);

    let ssres = pairs.iter().map(|(c, o)| (o - c).powi(2)).sum::<f64>();
    let sstot = observed.iter().map(|o| (o - mean).powi(2)).sum::<f64>();

    Ok(1.0 - ssres / sstot)
}

/// Value at quantile `perc` of a normal distribution with the given moments
///
/// `perc = 0.5` returns `mean` unchanged; 0 and 1 give the infinite tails.
pub fn percentile(mean: f64, variance: f64, perc: f64) -> Result<f64> {
    if variance.is_nan() || variance < 0.0 {
        return Err(MathError::InvalidInput(format!(
            "Variance must be non-negative, got {}",
            variance
        )));
    }

    if perc.is_nan() || !(0.0..=1.0).contains(&perc) {
        return Err(MathError::InvalidInput(format!(
            "Percentile must be between 0 and 1, got {}",
            perc
        )));
    }

    if perc == 0.5 {
        return Ok(mean);
    }

    let standard = Normal::new(0.0, 1.0).map_err(|e| MathError::CalculationError(e.to_string()))?;

    Ok(mean + standard.inverse_cdf(perc) * variance.sqrt())
}
