//! # Decline Workspace
//!
//! `decline_workspace` bundles the decline-curve engine and its numeric
//! helpers behind the handful of operations a front end needs: listing the
//! decline families, fitting one series or a group of items, forecasting
//! fitted models and translating between exponents and family names.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use decline_workspace::{fit, forecast, DateRange, FitOptions, Frequency, ProductionData, Window};
//!
//! let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! let dates: Vec<NaiveDate> = start.iter_days().take(4).collect();
//! let data = ProductionData::from_series(&dates, &[100.0, 90.0, 81.0, 72.9]).unwrap();
//!
//! let result = fit(&data, &Window::all(), None, &FitOptions::default()).unwrap();
//! let model = result.model.unwrap();
//!
//! let end = NaiveDate::from_ymd_opt(2023, 1, 6).unwrap();
//! let range = DateRange::new(NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(), end, Frequency::Daily);
//! let curve = forecast(&model, &range).unwrap();
//! assert!(curve.predicted()[0] < 72.9);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

pub use decline_curve;
pub use decline_math;

pub use decline_curve::{
    exponent_for, list_modes, mode_for, Analysis, AnalysisConfig, ColumnHeads, Curve, CurveTable,
    DateRange, DeclineError, DeclineFit, DeclineMode, DeclineModel, FitOptions, Frequency,
    ProductionData, Result, Window,
};

/// Fit one series with the given options
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use decline_workspace::{fit, FitOptions, ProductionData, Window};
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let dates: Vec<NaiveDate> = start.iter_days().take(3).collect();
/// let data = ProductionData::from_series(&dates, &[0.0, 0.0, 0.0]).unwrap();
///
/// let result = fit(&data, &Window::all(), None, &FitOptions::default()).unwrap();
/// assert!(!result.is_usable());
/// ```
pub fn fit(
    data: &ProductionData,
    window: &Window,
    date0: Option<NaiveDate>,
    options: &FitOptions,
) -> Result<DeclineFit> {
    Analysis::new(*options).fit(data, window, date0)
}

/// Fit every item of a keyed data set with the given options
pub fn fit_group(
    data: &ProductionData,
    window: &Window,
    options: &FitOptions,
) -> Result<BTreeMap<String, Result<DeclineFit>>> {
    Analysis::new(*options).fit_group(data, window)
}

/// Evaluate a model on the dates generated by `range`
pub fn forecast(model: &DeclineModel, range: &DateRange) -> Result<Curve> {
    Analysis::forecast(model, range)
}

/// Evaluate every model on the same dates, concatenated in iteration order
pub fn forecast_group<'a, K, I>(models: I, range: &DateRange) -> Result<CurveTable>
where
    K: fmt::Display + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a DeclineModel)>,
{
    Analysis::forecast_group(models, range)
}
