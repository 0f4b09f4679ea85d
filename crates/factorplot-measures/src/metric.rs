//! Metric kinds and the value filter applied to fetched results.

use factorplot_api::QueryType;
use std::fmt;

/// Factor metric carried by a factor risk report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Exposure of the portfolio or asset to the factor
    Exposure,
    /// PnL attributed to the factor
    Pnl,
    /// Share of total risk attributed to the factor
    ProportionOfRisk,
}

impl MetricKind {
    /// All metric kinds.
    pub const ALL: [Self; 3] = [Self::Exposure, Self::Pnl, Self::ProportionOfRisk];

    /// Remote query serving this metric.
    pub const fn query_type(&self) -> QueryType {
        match self {
            Self::Exposure => QueryType::FactorExposure,
            Self::Pnl => QueryType::FactorPnl,
            Self::ProportionOfRisk => QueryType::FactorProportionOfRisk,
        }
    }

    /// Field name in fetched records, also used as the series label.
    pub const fn field(&self) -> &'static str {
        self.query_type().field()
    }
}

impl From<QueryType> for MetricKind {
    fn from(query: QueryType) -> Self {
        match query {
            QueryType::FactorExposure => Self::Exposure,
            QueryType::FactorPnl => Self::Pnl,
            QueryType::FactorProportionOfRisk => Self::ProportionOfRisk,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Which fetched values make it into a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueFilter {
    /// Drop absent and zero values. NaN is kept.
    #[default]
    Truthy,
    /// Drop only absent values.
    Present,
}

impl ValueFilter {
    /// Return the value if it passes the filter.
    pub fn keep(&self, value: Option<f64>) -> Option<f64> {
        match self {
            Self::Truthy => value.filter(|v| *v != 0.0),
            Self::Present => value,
        }
    }
}
