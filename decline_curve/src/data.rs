//! Production time series held in a polars DataFrame

use crate::config::ColumnHeads;
use crate::error::{DeclineError, Result};
use crate::timespan::TimeSpan;
use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use std::collections::HashSet;

/// Dated rate observations, optionally keyed by item
#[derive(Debug, Clone)]
pub struct ProductionData {
    /// Data frame containing the observations
    df: DataFrame,
    /// Names of the date, rate and item columns
    heads: ColumnHeads,
}

impl ProductionData {
    /// Wrap an existing DataFrame, checking that the named columns exist
    pub fn from_dataframe(df: DataFrame, heads: ColumnHeads) -> Result<Self> {
        let mut required = vec![&heads.date, &heads.rate];
        if let Some(item) = &heads.item {
            required.push(item);
        }

        for name in required {
            df.column(name).map_err(|e| {
                DeclineError::DataError(format!("Column '{}' not found: {}", name, e))
            })?;
        }

        Ok(Self { df, heads })
    }

    /// Single series from dates and rates, under the default column names
    pub fn from_series(dates: &[NaiveDate], rates: &[f64]) -> Result<Self> {
        check_lengths(dates.len(), rates.len())?;

        let heads = ColumnHeads::default();
        let df = DataFrame::new(vec![
            date_series(&heads.date, dates)?,
            Series::new(&heads.rate, rates),
        ])?;

        Self::from_dataframe(df, heads)
    }

    /// Several series keyed by item, under the default column names and `item`
    pub fn from_items(items: &[&str], dates: &[NaiveDate], rates: &[f64]) -> Result<Self> {
        check_lengths(dates.len(), rates.len())?;
        check_lengths(dates.len(), items.len())?;

        let heads = ColumnHeads::default().with_item("item");
        let df = DataFrame::new(vec![
            Series::new("item", items),
            date_series(&heads.date, dates)?,
            Series::new(&heads.rate, rates),
        ])?;

        Self::from_dataframe(df, heads)
    }

    /// Get the DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Get the column names
    pub fn heads(&self) -> &ColumnHeads {
        &self.heads
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Dates of the date column; date and datetime columns are accepted
    pub fn dates(&self) -> Result<TimeSpan> {
        let epoch = NaiveDate::default();
        let col = self.column(&self.heads.date)?;
        let days = col.cast(&DataType::Date)?.cast(&DataType::Int32)?;

        let dates = days
            .i32()?
            .into_iter()
            .enumerate()
            .map(|(row, day)| {
                let day = day.ok_or_else(|| {
                    DeclineError::DataError(format!(
                        "Missing date in column '{}' at row {}",
                        self.heads.date, row
                    ))
                })?;
                epoch
                    .checked_add_signed(Duration::days(i64::from(day)))
                    .ok_or_else(|| DeclineError::DataError(format!("Date out of range at row {}", row)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TimeSpan::new(dates))
    }

    /// Rates of the rate column; missing values become NaN
    pub fn rates(&self) -> Result<Vec<f64>> {
        let col = self.column(&self.heads.rate)?;
        let rates = col.cast(&DataType::Float64).map_err(|e| {
            DeclineError::DataError(format!(
                "Column '{}' cannot be converted to f64: {}",
                self.heads.rate, e
            ))
        })?;

        let values = rates
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();

        Ok(values)
    }

    /// Item key of every row
    pub fn items(&self) -> Result<Vec<String>> {
        let head = self.heads.item.as_ref().ok_or_else(|| {
            DeclineError::DataError("No item column configured".to_string())
        })?;

        let keys = self.column(head)?.cast(&DataType::Utf8)?;

        let items = keys
            .utf8()?
            .into_iter()
            .enumerate()
            .map(|(row, key)| {
                key.map(str::to_string).ok_or_else(|| {
                    DeclineError::DataError(format!(
                        "Missing item in column '{}' at row {}",
                        head, row
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(items)
    }

    /// Split into one series per item, in order of first appearance
    pub fn partition(&self) -> Result<Vec<(String, ProductionData)>> {
        let items = self.items()?;

        let mut seen = HashSet::new();
        let keys: Vec<&String> = items.iter().filter(|key| seen.insert(*key)).collect();

        keys.into_iter()
            .map(|key| -> Result<(String, ProductionData)> {
                let mask: Vec<bool> = items.iter().map(|item| item == key).collect();
                let mask = BooleanChunked::from_slice("mask", &mask);

                Ok((
                    key.clone(),
                    ProductionData {
                        df: self.df.filter(&mask)?,
                        heads: self.heads.clone(),
                    },
                ))
            })
            .collect()
    }

    fn column(&self, name: &str) -> Result<&Series> {
        self.df.column(name).map_err(|e| {
            DeclineError::DataError(format!("Column '{}' not found: {}", name, e))
        })
    }
}

/// Date-typed series from calendar dates
pub(crate) fn date_series(name: &str, dates: &[NaiveDate]) -> Result<Series> {
    let epoch = NaiveDate::default();

    let days = dates
        .iter()
        .map(|&date| {
            i32::try_from((date - epoch).num_days())
                .map_err(|_| DeclineError::DataError(format!("Date {} out of range", date)))
        })
        .collect::<Result<Vec<i32>>>()?;

    Ok(Series::new(name, days).cast(&DataType::Date)?)
}

fn check_lengths(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(DeclineError::DataError(format!(
            "Column lengths differ: {} vs {}",
            expected, actual
        )));
    }

    Ok(())
}
