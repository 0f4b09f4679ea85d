//! Date-indexed factor series and their tabular packaging.

use crate::error::{MeasureError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use factorplot_api::QueryType;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Name of the index column in packaged frames
pub const DATE_COLUMN: &str = "date";

/// Days from 0001-01-01 (CE) to 1970-01-01, the epoch of `DataType::Date`
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a result date into a calendar date.
///
/// Accepts plain dates (`2021-01-04`, `20210104`), naive datetimes and RFC 3339
/// timestamps. Times are discarded; timestamps keep their own offset's date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = raw[..4].parse().ok()?;
        let month: u32 = raw[4..6].parse().ok()?;
        let day: u32 = raw[6..].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|datetime| datetime.date())
}

/// A date-indexed series of one factor metric.
///
/// Dates are unique and ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorSeries {
    query_type: QueryType,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl FactorSeries {
    /// Build a series from `(date, value)` points in any order.
    ///
    /// When a date appears more than once the last value wins.
    pub fn from_points(
        query_type: QueryType,
        points: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Self {
        let indexed: BTreeMap<NaiveDate, f64> = points.into_iter().collect();
        let (dates, values) = indexed.into_iter().unzip();
        Self {
            query_type,
            dates,
            values,
        }
    }

    /// An empty series for `query_type`.
    pub const fn empty(query_type: QueryType) -> Self {
        Self {
            query_type,
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Series label, the record field the values came from.
    pub const fn label(&self) -> &'static str {
        self.query_type.field()
    }

    /// Query the series answers.
    pub const fn query_type(&self) -> QueryType {
        self.query_type
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Index dates in ascending order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Values aligned with [`dates`](Self::dates).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `date`, if present.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|idx| self.values[idx])
    }

    /// Iterate over `(date, value)` points in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Earliest point.
    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.iter().next()
    }

    /// Latest point.
    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.iter().last()
    }

    /// Package the series as a frame with a `date` column and a value column
    /// named by [`label`](Self::label).
    pub fn to_frame(&self) -> Result<DataFrame> {
        let days: Vec<i32> = self
            .dates
            .iter()
            .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            .collect();
        let dates = Series::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?;
        let values = Series::new(self.label().into(), self.values.clone());

        Ok(DataFrame::new(vec![dates.into(), values.into()])?)
    }
}

/// Select the value column for `query_type` from a frame that may hold several.
///
/// # Errors
/// Returns `MeasureError::MissingColumn` if the frame has no such column.
pub fn extract_series(frame: &DataFrame, query_type: QueryType) -> Result<Series> {
    let name = query_type.field();
    frame
        .column(name)
        .map(|column| column.as_materialized_series().clone())
        .map_err(|_| MeasureError::MissingColumn(name.to_string()))
}
