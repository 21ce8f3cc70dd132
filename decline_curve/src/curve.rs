//! Predicted rate tables produced by evaluating a model over dates

use crate::config::ColumnHeads;
use crate::data::date_series;
use crate::error::Result;
use crate::models::DeclineModel;
use crate::timespan::TimeSpan;
use chrono::NaiveDate;
use polars::prelude::*;

/// Predicted rates and cumulative volumes keyed by date
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    item: Option<String>,
    dates: Vec<NaiveDate>,
    predicted: Vec<f64>,
    cumulative: Vec<f64>,
}

impl Curve {
    /// Evaluate `model` on every date of `span`
    pub fn evaluate(model: &DeclineModel, span: &TimeSpan) -> Result<Self> {
        let days = model.days(span);

        Ok(Self {
            item: None,
            dates: span.dates().to_vec(),
            predicted: model.forward(&days),
            cumulative: model.cumulative(&days)?,
        })
    }

    /// Label every row with an item key
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn predicted(&self) -> &[f64] {
        &self.predicted
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn to_dataframe(&self, heads: &ColumnHeads) -> Result<DataFrame> {
        CurveTable::from(vec![self.clone()]).to_dataframe(heads)
    }
}

/// Several curves stacked in evaluation order
///
/// Rows are never merged across curves, so overlapping dates repeat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveTable {
    curves: Vec<Curve>,
}

impl CurveTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, curve: Curve) {
        self.curves.push(curve);
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Total number of rows
    pub fn len(&self) -> usize {
        self.curves.iter().map(Curve::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.curves.iter().flat_map(|c| c.dates.iter().copied()).collect()
    }

    pub fn predicted(&self) -> Vec<f64> {
        self.curves.iter().flat_map(|c| c.predicted.iter().copied()).collect()
    }

    pub fn cumulative(&self) -> Vec<f64> {
        self.curves.iter().flat_map(|c| c.cumulative.iter().copied()).collect()
    }

    /// Item key of every row, `None` for unlabeled curves
    pub fn items(&self) -> Vec<Option<&str>> {
        self.curves
            .iter()
            .flat_map(|c| std::iter::repeat(c.item()).take(c.len()))
            .collect()
    }

    /// Table as a DataFrame; the item column appears when any curve is labeled
    pub fn to_dataframe(&self, heads: &ColumnHeads) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(4);

        if self.curves.iter().any(|c| c.item.is_some()) {
            let name = heads.item.as_deref().unwrap_or("item");
            columns.push(Series::new(name, self.items()));
        }

        columns.push(date_series(&heads.date, &self.dates())?);
        columns.push(Series::new(&heads.predicted, self.predicted()));
        columns.push(Series::new(&heads.cumulative, self.cumulative()));

        Ok(DataFrame::new(columns)?)
    }
}

impl From<Vec<Curve>> for CurveTable {
    fn from(curves: Vec<Curve>) -> Self {
        Self { curves }
    }
}
