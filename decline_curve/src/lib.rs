//! # Decline Curve
//!
//! A Rust library for Arps decline-curve analysis of production-rate time series.
//!
//! ## Features
//!
//! - Exponential, hyperbolic and harmonic decline in one model family
//! - Rate and cumulative-volume evaluation
//! - Linearized least squares fitting with R² on the rate scale
//! - Per-item group fitting that isolates failures
//! - Daily, monthly and yearly forecasts anchored to calendar dates
//!
//! ## Decline Modes
//!
//! The decline exponent `b` selects the closed form:
//!
//! ```rust
//! use decline_curve::models::{exponent_for, mode_for, DeclineMode};
//!
//! assert_eq!(mode_for(0.0), DeclineMode::Exponential);
//! assert_eq!(mode_for(0.3), DeclineMode::Hyperbolic);
//! assert_eq!(mode_for(1.0), DeclineMode::Harmonic);
//! assert_eq!(exponent_for("Hyperbolic").unwrap(), 0.5);
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use decline_curve::{Analysis, DateRange, FitOptions, Frequency, ProductionData, Window};
//!
//! let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! let dates: Vec<NaiveDate> = (0..4).map(|d| start + chrono::Duration::days(d)).collect();
//! let data = ProductionData::from_series(&dates, &[100.0, 90.0, 81.0, 72.9]).unwrap();
//!
//! // Fit exponential decline anchored at the first date
//! let analysis = Analysis::new(FitOptions::new());
//! let fit = analysis.fit(&data, &Window::all(), Some(start)).unwrap();
//! let model = fit.model.unwrap();
//!
//! // Forecast two more days
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
//!     NaiveDate::from_ymd_opt(2023, 1, 6).unwrap(),
//!     Frequency::Daily,
//! );
//! let curve = Analysis::forecast(&model, &range).unwrap();
//! assert_eq!(curve.len(), 2);
//! ```

pub mod analysis;
pub mod config;
pub mod curve;
pub mod data;
pub mod error;
pub mod fitting;
pub mod models;
pub mod timespan;

// Re-export commonly used types
pub use crate::analysis::{fitted_models, Analysis, DeclineFit};
pub use crate::config::{AnalysisConfig, ColumnHeads, FitOptions};
pub use crate::curve::{Curve, CurveTable};
pub use crate::data::ProductionData;
pub use crate::error::{DeclineError, Result};
pub use crate::fitting::{regress, NonLinearResult, RegressionResult};
pub use crate::models::{
    exponent_for, list_modes, mode_for, Arps, DeclineMode, DeclineModel,
    HyperbolicExponent,
};
pub use crate::timespan::{DateRange, Frequency, TimeSpan, Window};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
