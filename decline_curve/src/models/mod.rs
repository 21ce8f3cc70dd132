//! Arps decline models
//!
//! The decline exponent `b` selects one of three closed-form families:
//!
//! - `b = 0`: exponential
//! - `0 < b < 1`: hyperbolic
//! - `b = 1`: harmonic

use crate::error::{DeclineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod arps;
pub mod decline;

pub use self::arps::{Arps, HyperbolicExponent};
pub use self::decline::DeclineModel;

/// Named decline family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeclineMode {
    Exponential,
    Hyperbolic,
    Harmonic,
}

impl DeclineMode {
    /// Every mode, in selection-control order
    pub const ALL: [DeclineMode; 3] = [
        DeclineMode::Exponential,
        DeclineMode::Hyperbolic,
        DeclineMode::Harmonic,
    ];

    /// Mode selected by an exponent; exact comparison against 0 and 1
    pub fn from_exponent(b: f64) -> Self {
        if b == 0.0 {
            DeclineMode::Exponential
        } else if b == 1.0 {
            DeclineMode::Harmonic
        } else {
            DeclineMode::Hyperbolic
        }
    }

    /// Canonical exponent of the mode
    ///
    /// 0.5 for hyperbolic is a representative default, not a fitted value.
    pub fn exponent(self) -> f64 {
        match self {
            DeclineMode::Exponential => 0.0,
            DeclineMode::Hyperbolic => 0.5,
            DeclineMode::Harmonic => 1.0,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            DeclineMode::Exponential => "Exponential",
            DeclineMode::Hyperbolic => "Hyperbolic",
            DeclineMode::Harmonic => "Harmonic",
        }
    }
}

impl fmt::Display for DeclineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeclineMode {
    type Err = DeclineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "exponential" | "exp" => Ok(DeclineMode::Exponential),
            "hyperbolic" | "hyp" => Ok(DeclineMode::Hyperbolic),
            "harmonic" | "har" => Ok(DeclineMode::Harmonic),
            _ => Err(DeclineError::InvalidParameter(format!(
                "Unknown decline mode '{}'. Available modes are Exponential, Hyperbolic, and Harmonic.",
                s
            ))),
        }
    }
}

impl TryFrom<String> for DeclineMode {
    type Error = DeclineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DeclineMode> for String {
    fn from(mode: DeclineMode) -> Self {
        mode.name().to_string()
    }
}

/// Modes available for selection
pub fn list_modes() -> [DeclineMode; 3] {
    DeclineMode::ALL
}

/// Mode for a numeric exponent
pub fn mode_for(b: f64) -> DeclineMode {
    DeclineMode::from_exponent(b)
}

/// Canonical exponent for a mode name
pub fn exponent_for(mode: &str) -> Result<f64> {
    mode.parse::<DeclineMode>().map(DeclineMode::exponent)
}
