//! Export functionality for factor series.
//!
//! Series can be written as CSV, compact JSON or pretty-printed JSON, either
//! one at a time or as a panel of several metrics joined on date.

use chrono::NaiveDate;
use factorplot_api::QueryType;
use factorplot_measures::FactorSeries;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer produced invalid UTF-8.
    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_extension(extension: &str) -> Result<Self, ExportError> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::InvalidFormat(format!(
                "unsupported extension {other:?}"
            ))),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// One dated value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    /// Index date.
    pub date: NaiveDate,

    /// Metric value.
    pub value: f64,
}

/// Serialized form of a single series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesExport {
    /// Query the series answers.
    pub query: QueryType,

    /// Series label.
    pub label: String,

    /// Points in date order.
    pub points: Vec<SeriesPoint>,
}

impl From<&FactorSeries> for SeriesExport {
    fn from(series: &FactorSeries) -> Self {
        Self {
            query: series.query_type(),
            label: series.label().to_string(),
            points: series
                .iter()
                .map(|(date, value)| SeriesPoint { date, value })
                .collect(),
        }
    }
}

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

impl Exporter for FactorSeries {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.write_record(["date", self.label()])?;
                for (date, value) in self.iter() {
                    wtr.write_record([date.to_string(), value.to_string()])?;
                }
                finish_csv(wtr)
            }
            ExportFormat::Json => Ok(serde_json::to_string(&SeriesExport::from(self))?),
            ExportFormat::PrettyJson => {
                Ok(serde_json::to_string_pretty(&SeriesExport::from(self))?)
            }
        }
    }
}

/// Several metrics of one factor joined on date.
///
/// Dates missing from a series are left blank in CSV and `null` in JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorPanel {
    factor_name: String,
    series: Vec<FactorSeries>,
}

/// One date of a [`FactorPanel`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelRow {
    /// Index date.
    pub date: NaiveDate,

    /// Value per series label, `None` where the series has no point.
    pub values: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Serialize)]
struct PanelDocument<'a> {
    factor: &'a str,
    columns: Vec<&'static str>,
    rows: Vec<PanelRow>,
}

impl FactorPanel {
    /// Create a panel for `factor_name`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InvalidFormat` if two series share a query.
    pub fn new(
        factor_name: impl Into<String>,
        series: Vec<FactorSeries>,
    ) -> Result<Self, ExportError> {
        for (idx, s) in series.iter().enumerate() {
            if series[..idx]
                .iter()
                .any(|other| other.query_type() == s.query_type())
            {
                return Err(ExportError::InvalidFormat(format!(
                    "duplicate column {:?}",
                    s.label()
                )));
            }
        }
        Ok(Self {
            factor_name: factor_name.into(),
            series,
        })
    }

    /// Factor the panel describes.
    pub fn factor_name(&self) -> &str {
        &self.factor_name
    }

    /// Column labels in insertion order.
    pub fn columns(&self) -> Vec<&'static str> {
        self.series.iter().map(FactorSeries::label).collect()
    }

    /// Rows over the union of all series dates, in date order.
    pub fn rows(&self) -> Vec<PanelRow> {
        let mut dates: Vec<NaiveDate> = self
            .series
            .iter()
            .flat_map(|s| s.dates().iter().copied())
            .collect();
        dates.sort_unstable();
        dates.dedup();

        dates
            .into_iter()
            .map(|date| PanelRow {
                date,
                values: self
                    .series
                    .iter()
                    .map(|s| (s.label().to_string(), s.get(date)))
                    .collect(),
            })
            .collect()
    }
}

impl Exporter for FactorPanel {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let columns = self.columns();
                let mut wtr = csv::Writer::from_writer(vec![]);

                let mut header = vec!["date"];
                header.extend(columns.iter().copied());
                wtr.write_record(&header)?;

                for row in self.rows() {
                    let mut record = vec![row.date.to_string()];
                    for column in &columns {
                        let cell = row
                            .values
                            .get(*column)
                            .copied()
                            .flatten()
                            .map(|v| v.to_string())
                            .unwrap_or_default();
                        record.push(cell);
                    }
                    wtr.write_record(&record)?;
                }
                finish_csv(wtr)
            }
            ExportFormat::Json | ExportFormat::PrettyJson => {
                let document = PanelDocument {
                    factor: &self.factor_name,
                    columns: self.columns(),
                    rows: self.rows(),
                };
                if format == ExportFormat::Json {
                    Ok(serde_json::to_string(&document)?)
                } else {
                    Ok(serde_json::to_string_pretty(&document)?)
                }
            }
        }
    }
}
