//! Decline model anchored to a calendar date

use crate::error::{DeclineError, Result};
use crate::models::{Arps, DeclineMode};
use crate::timespan::TimeSpan;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Arps decline model with its parameters and calendar anchor
///
/// Elapsed time is measured in days from `date0`; `yi` is the rate at
/// offset `xi`, and every evaluation is relative to `xi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DeclineRecord", into = "DeclineRecord")]
pub struct DeclineModel {
    arps: Arps,
    di: f64,
    yi: f64,
    xi: f64,
    date0: NaiveDate,
}

/// Plain stored form of a model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct DeclineRecord {
    b: f64,
    #[serde(rename = "Di")]
    di: f64,
    yi: f64,
    #[serde(default)]
    xi: f64,
    date0: NaiveDate,
}

impl DeclineModel {
    /// Create a model with its origin at `date0`
    pub fn new(b: f64, di: f64, yi: f64, date0: NaiveDate) -> Result<Self> {
        let arps = Arps::from_exponent(b)?;
        check_decline(di)?;
        check_rate(yi)?;

        Ok(Self {
            arps,
            di,
            yi,
            xi: 0.0,
            date0,
        })
    }

    /// Create a model using the canonical exponent of `mode`
    pub fn from_mode(mode: DeclineMode, di: f64, yi: f64, date0: NaiveDate) -> Result<Self> {
        Self::new(mode.exponent(), di, yi, date0)
    }

    /// Move the origin to `xi` days after `date0`
    pub fn with_origin(mut self, xi: f64) -> Result<Self> {
        if !xi.is_finite() {
            return Err(DeclineError::InvalidParameter(format!(
                "Origin offset must be finite, got {}",
                xi
            )));
        }

        self.xi = xi;
        Ok(self)
    }

    /// Replace the initial rate
    pub fn with_rate(mut self, yi: f64) -> Result<Self> {
        check_rate(yi)?;
        self.yi = yi;
        Ok(self)
    }

    /// Replace the initial decline rate
    pub fn with_decline(mut self, di: f64) -> Result<Self> {
        check_decline(di)?;
        self.di = di;
        Ok(self)
    }

    /// Closed form of the model's family
    pub fn arps(&self) -> Arps {
        self.arps
    }

    /// Decline exponent
    pub fn b(&self) -> f64 {
        self.arps.exponent()
    }

    /// Initial decline rate, per day
    pub fn di(&self) -> f64 {
        self.di
    }

    /// Initial rate
    pub fn yi(&self) -> f64 {
        self.yi
    }

    /// Origin offset in days from `date0`
    pub fn xi(&self) -> f64 {
        self.xi
    }

    /// Calendar date of offset zero
    pub fn date0(&self) -> NaiveDate {
        self.date0
    }

    /// Named mode of the model's family
    pub fn mode(&self) -> DeclineMode {
        self.arps.mode()
    }

    /// Rates at elapsed days `x`
    ///
    /// Offsets before `xi` are extrapolated by the same formula.
    pub fn forward(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .map(|&x| self.arps.rate(self.di, self.yi, x - self.xi))
            .collect()
    }

    /// Cumulative volumes at elapsed days `x`
    pub fn cumulative(&self, x: &[f64]) -> Result<Vec<f64>> {
        x.iter()
            .map(|&x| self.arps.cumulative(self.di, self.yi, x - self.xi))
            .collect()
    }

    /// Elapsed days of `span` measured from this model's anchor
    pub fn days(&self, span: &TimeSpan) -> Vec<f64> {
        span.days(self.date0)
    }
}

fn check_decline(di: f64) -> Result<()> {
    if !di.is_finite() || di <= 0.0 {
        return Err(DeclineError::InvalidParameter(format!(
            "Initial decline rate must be positive and finite, got {}",
            di
        )));
    }

    Ok(())
}

fn check_rate(yi: f64) -> Result<()> {
    if !yi.is_finite() {
        return Err(DeclineError::InvalidParameter(format!(
            "Initial rate must be finite, got {}",
            yi
        )));
    }

    Ok(())
}

impl TryFrom<DeclineRecord> for DeclineModel {
    type Error = DeclineError;

    fn try_from(record: DeclineRecord) -> Result<Self> {
        Self::new(record.b, record.di, record.yi, record.date0)?.with_origin(record.xi)
    }
}

impl From<DeclineModel> for DeclineRecord {
    fn from(model: DeclineModel) -> Self {
        Self {
            b: model.b(),
            di: model.di,
            yi: model.yi,
            xi: model.xi,
            date0: model.date0,
        }
    }
}
