//! Column names and fit options

use crate::error::{DeclineError, Result};
use crate::models::{exponent_for, DeclineMode};
use serde::{Deserialize, Serialize};

/// Column names of input and output frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnHeads {
    /// Date column of the input, reused for output curves
    pub date: String,
    /// Observed rate column
    pub rate: String,
    /// Item (well, group) key column; `None` for a single series
    pub item: Option<String>,
    /// Predicted rate column of output curves
    pub predicted: String,
    /// Cumulative volume column of output curves
    pub cumulative: String,
}

impl Default for ColumnHeads {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            rate: "rate".to_string(),
            item: None,
            predicted: "predicted".to_string(),
            cumulative: "cumulative".to_string(),
        }
    }
}

impl ColumnHeads {
    /// Heads for an input with the given date and rate columns
    pub fn new(date: &str, rate: &str) -> Self {
        Self {
            date: date.to_string(),
            rate: rate.to_string(),
            ..Self::default()
        }
    }

    pub fn with_item(mut self, item: &str) -> Self {
        self.item = Some(item.to_string());
        self
    }
}

/// Options of a single decline fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Decline exponent of the fitted family
    pub exponent: f64,
    /// Offset in days where the fitted initial rate is defined; earlier
    /// observations are left out of the fit
    pub origin: Option<f64>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            exponent: 0.0,
            origin: None,
        }
    }
}

impl FitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for the given mode and exponent, either of which may be absent
    ///
    /// With neither, the fit is exponential. An explicit exponent always
    /// wins over the mode; a mode alone uses its canonical exponent.
    pub fn resolve(mode: Option<&str>, b: Option<f64>) -> Result<Self> {
        let exponent = match (mode, b) {
            (_, Some(b)) => b,
            (Some(mode), None) => exponent_for(mode)?,
            (None, None) => 0.0,
        };

        Self::new().with_exponent(exponent)
    }

    pub fn with_mode(self, mode: DeclineMode) -> Self {
        Self {
            exponent: mode.exponent(),
            ..self
        }
    }

    pub fn with_exponent(self, exponent: f64) -> Result<Self> {
        if !exponent.is_finite() || !(0.0..=1.0).contains(&exponent) {
            return Err(DeclineError::InvalidParameter(format!(
                "Decline exponent must be between 0 and 1, got {}",
                exponent
            )));
        }

        Ok(Self { exponent, ..self })
    }

    pub fn with_origin(self, origin: f64) -> Self {
        Self {
            origin: Some(origin),
            ..self
        }
    }

    pub fn mode(&self) -> DeclineMode {
        DeclineMode::from_exponent(self.exponent)
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub heads: ColumnHeads,
    pub fit: FitOptions,
}

impl AnalysisConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DeclineError::InvalidParameter(format!("Invalid configuration: {}", e)))?;

        // Route the exponent through the same validation as the builder
        FitOptions::new().with_exponent(config.fit.exponent)?;

        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DeclineError::DataError(format!("Cannot serialize configuration: {}", e)))
    }
}
