//! Calendar dates and elapsed-day offsets

use crate::error::{DeclineError, Result};
use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Step between generated forecast dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Every frequency, in selection-control order
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Monthly, Frequency::Yearly];

    /// The `k`-th date after `start`
    ///
    /// Months are added to `start` directly, so a month-end start stays
    /// clamped to each month's end instead of drifting.
    fn step(self, start: NaiveDate, k: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => start.checked_add_signed(Duration::days(i64::from(k))),
            Frequency::Monthly => start.checked_add_months(Months::new(k)),
            Frequency::Yearly => start.checked_add_months(Months::new(k.checked_mul(12)?)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Frequency {
    type Err = DeclineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" => Ok(Frequency::Daily),
            "monthly" | "m" => Ok(Frequency::Monthly),
            "yearly" | "y" => Ok(Frequency::Yearly),
            _ => Err(DeclineError::InvalidParameter(format!(
                "Unsupported frequency: {}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = DeclineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        frequency.name().to_string()
    }
}

/// Request for a generated sequence of dates
///
/// Exactly one of `end` (inclusive) and `periods` bounds the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub periods: Option<usize>,
    pub frequency: Frequency,
}

impl DateRange {
    /// Dates from `start` through `end`
    pub fn new(start: NaiveDate, end: NaiveDate, frequency: Frequency) -> Self {
        Self {
            start,
            end: Some(end),
            periods: None,
            frequency,
        }
    }

    /// `periods` dates beginning at `start`
    pub fn with_periods(start: NaiveDate, periods: usize, frequency: Frequency) -> Self {
        Self {
            start,
            end: None,
            periods: Some(periods),
            frequency,
        }
    }
}

/// Inclusive date window; a missing bound leaves that side open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub lo: Option<NaiveDate>,
    pub hi: Option<NaiveDate>,
}

impl Window {
    /// Unbounded window
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(lo: NaiveDate, hi: NaiveDate) -> Self {
        Self {
            lo: Some(lo),
            hi: Some(hi),
        }
    }

    pub fn since(lo: NaiveDate) -> Self {
        Self {
            lo: Some(lo),
            hi: None,
        }
    }

    pub fn until(hi: NaiveDate) -> Self {
        Self {
            lo: None,
            hi: Some(hi),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.lo.map_or(true, |lo| date >= lo) && self.hi.map_or(true, |hi| date <= hi)
    }
}

/// Ordered sequence of calendar dates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSpan {
    dates: Vec<NaiveDate>,
}

impl TimeSpan {
    /// Wrap a sequence of dates as given
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self { dates }
    }

    /// Generate the dates described by `range`
    pub fn range(range: &DateRange) -> Result<Self> {
        let mut dates = Vec::new();

        match (range.end, range.periods) {
            (Some(end), None) => {
                for k in 0u32.. {
                    let date = range.frequency.step(range.start, k).ok_or_else(|| {
                        DeclineError::InvalidParameter("Date range overflows".to_string())
                    })?;
                    if date > end {
                        break;
                    }
                    dates.push(date);
                }
            }
            (None, Some(periods)) => {
                dates.reserve(periods);
                for k in 0..periods {
                    let date = u32::try_from(k)
                        .ok()
                        .and_then(|k| range.frequency.step(range.start, k))
                        .ok_or_else(|| {
                            DeclineError::InvalidParameter("Date range overflows".to_string())
                        })?;
                    dates.push(date);
                }
            }
            _ => {
                return Err(DeclineError::InvalidParameter(
                    "Date range needs exactly one of end date or number of periods".to_string(),
                ))
            }
        }

        Ok(Self { dates })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Whole days from `anchor` to each date, negative before the anchor
    pub fn days(&self, anchor: NaiveDate) -> Vec<f64> {
        self.dates
            .iter()
            .map(|&date| (date - anchor).num_days() as f64)
            .collect()
    }

    /// Inclusive membership of each date in `[lo, hi]`
    pub fn within(&self, lo: Option<NaiveDate>, hi: Option<NaiveDate>) -> Vec<bool> {
        let window = Window { lo, hi };
        self.dates.iter().map(|&date| window.contains(date)).collect()
    }

    /// Dates where `mask` is true
    pub fn select(&self, mask: &[bool]) -> Self {
        Self {
            dates: self
                .dates
                .iter()
                .zip(mask.iter())
                .filter(|(_, &keep)| keep)
                .map(|(&date, _)| date)
                .collect(),
        }
    }

    /// Earliest date, the default fit origin
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.dates.iter().min().copied()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.dates.iter().max().copied()
    }

    /// Earliest and latest dates
    pub fn limit(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.min_date()?, self.max_date()?))
    }
}

impl From<Vec<NaiveDate>> for TimeSpan {
    fn from(dates: Vec<NaiveDate>) -> Self {
        Self::new(dates)
    }
}
