//! Fitting and forecasting over single series and item groups

use crate::config::{AnalysisConfig, FitOptions};
use crate::curve::{Curve, CurveTable};
use crate::data::ProductionData;
use crate::error::Result;
use crate::fitting::{regress, RegressionResult};
use crate::models::{Arps, DeclineMode, DeclineModel};
use crate::timespan::{DateRange, TimeSpan, Window};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Regression outcome and, when usable, the model it defines
#[derive(Debug, Clone, PartialEq)]
pub struct DeclineFit {
    pub regression: RegressionResult,
    pub model: Option<DeclineModel>,
}

impl DeclineFit {
    pub fn is_usable(&self) -> bool {
        self.model.is_some()
    }

    /// R² on the rate scale, NaN without a usable fit
    pub fn rsquared(&self) -> f64 {
        if self.is_usable() {
            self.regression.nonlinear.rsquared
        } else {
            f64::NAN
        }
    }

    /// Whether this fit should replace `other` when choosing a family
    fn ranks_above(&self, other: &DeclineFit) -> bool {
        match (self.is_usable(), other.is_usable()) {
            (true, false) => true,
            (true, true) => rank(self.rsquared()) > rank(other.rsquared()),
            _ => false,
        }
    }
}

fn rank(rsquared: f64) -> f64 {
    if rsquared.is_nan() {
        f64::NEG_INFINITY
    } else {
        rsquared
    }
}

/// Decline analysis with fixed fit options
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    options: FitOptions,
}

impl Analysis {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.fit)
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fit the configured family to the observations inside `window`
    ///
    /// Elapsed days are counted from `date0`, or from the earliest date in
    /// the window, and the fitted model is anchored there. A regression
    /// that cannot be computed gives a fit without a model, not an error.
    pub fn fit(
        &self,
        data: &ProductionData,
        window: &Window,
        date0: Option<NaiveDate>,
    ) -> Result<DeclineFit> {
        self.fit_with(data, window, date0, &self.options)
    }

    /// Fit every item independently
    ///
    /// One item's failure is recorded under its key and never stops the
    /// remaining items.
    pub fn fit_group(
        &self,
        data: &ProductionData,
        window: &Window,
    ) -> Result<BTreeMap<String, Result<DeclineFit>>> {
        let groups = data.partition()?;

        let fits = groups
            .into_iter()
            .map(|(item, frame)| {
                let fit = self.fit(&frame, window, None);

                match &fit {
                    Err(err) => warn!(item = %item, "decline fit failed: {}", err),
                    Ok(DeclineFit {
                        regression:
                            RegressionResult {
                                failure: Some(failure),
                                ..
                            },
                        ..
                    }) => warn!(item = %item, "no usable decline fit: {}", failure),
                    Ok(_) => {}
                }

                (item, fit)
            })
            .collect();

        Ok(fits)
    }

    /// Fit exponential, hyperbolic and harmonic decline and keep the best
    ///
    /// The hyperbolic candidate uses the configured exponent when it is
    /// hyperbolic, otherwise the canonical 0.5. Fits are ranked by R² on the
    /// rate scale; an unusable fit never wins over a usable one.
    pub fn best_fit(
        &self,
        data: &ProductionData,
        window: &Window,
        date0: Option<NaiveDate>,
    ) -> Result<DeclineFit> {
        let hyperbolic = match self.options.mode() {
            DeclineMode::Hyperbolic => self.options.exponent,
            _ => DeclineMode::Hyperbolic.exponent(),
        };

        let candidate = |exponent: f64| FitOptions {
            exponent,
            ..self.options
        };

        let mut best = self.fit_with(data, window, date0, &candidate(0.0))?;
        for exponent in [hyperbolic, 1.0] {
            let fit = self.fit_with(data, window, date0, &candidate(exponent))?;
            if fit.ranks_above(&best) {
                best = fit;
            }
        }

        debug!(exponent = best.regression.b, rsquared = best.rsquared(), "best decline mode");

        Ok(best)
    }

    /// Model evaluated on the observed dates inside `window`
    pub fn estimate(
        model: &DeclineModel,
        data: &ProductionData,
        window: &Window,
    ) -> Result<Curve> {
        let span = data.dates()?;
        let mask = span.within(window.lo, window.hi);

        Curve::evaluate(model, &span.select(&mask))
    }

    /// Model evaluated on the dates generated by `range`
    pub fn forecast(model: &DeclineModel, range: &DateRange) -> Result<Curve> {
        let span = TimeSpan::range(range)?;
        Curve::evaluate(model, &span)
    }

    /// Every model evaluated on the same generated dates, stacked in
    /// iteration order and labeled by key
    pub fn forecast_group<'a, K, I>(models: I, range: &DateRange) -> Result<CurveTable>
    where
        K: fmt::Display + ?Sized + 'a,
        I: IntoIterator<Item = (&'a K, &'a DeclineModel)>,
    {
        let span = TimeSpan::range(range)?;
        let mut table = CurveTable::new();

        for (key, model) in models {
            match Curve::evaluate(model, &span) {
                Ok(curve) => table.push(curve.with_item(key.to_string())),
                Err(err) => warn!(item = %key, "decline forecast skipped: {}", err),
            }
        }

        Ok(table)
    }

    fn fit_with(
        &self,
        data: &ProductionData,
        window: &Window,
        date0: Option<NaiveDate>,
        options: &FitOptions,
    ) -> Result<DeclineFit> {
        let arps = Arps::from_exponent(options.exponent)?;

        let span = data.dates()?;
        let rates = data.rates()?;

        let mask = span.within(window.lo, window.hi);
        let span = span.select(&mask);
        let rates: Vec<f64> = rates
            .into_iter()
            .zip(mask.iter())
            .filter(|(_, &keep)| keep)
            .map(|(rate, _)| rate)
            .collect();

        let anchor = date0.or_else(|| span.min_date());
        let days = anchor.map(|anchor| span.days(anchor)).unwrap_or_default();

        let regression = regress(arps, &days, &rates, options.origin)?;

        let anchor = match anchor {
            Some(anchor) if regression.is_usable() => anchor,
            _ => {
                return Ok(DeclineFit {
                    regression,
                    model: None,
                })
            }
        };

        match regression.model(anchor) {
            Ok(model) => {
                debug!(mode = %model.mode(), di = model.di(), yi = model.yi(), date0 = %anchor, "decline fit");
                Ok(DeclineFit {
                    regression,
                    model: Some(model),
                })
            }
            Err(err) => {
                warn!(mode = %arps.mode(), "fitted decline rejected: {}", err);
                Ok(DeclineFit {
                    regression: regression.reject(err),
                    model: None,
                })
            }
        }
    }
}

/// Usable models of a group fit, by item
pub fn fitted_models(fits: &BTreeMap<String, Result<DeclineFit>>) -> BTreeMap<String, DeclineModel> {
    fits.iter()
        .filter_map(|(item, fit)| {
            let model = fit.as_ref().ok()?.model?;
            Some((item.clone(), model))
        })
        .collect()
}
