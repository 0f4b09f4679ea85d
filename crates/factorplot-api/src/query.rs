//! Query kinds and per-request fetch options.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Factor timeseries queries served by factor risk reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryType {
    /// Factor exposure
    FactorExposure,
    /// Factor PnL
    FactorPnl,
    /// Factor proportion of risk
    FactorProportionOfRisk,
}

impl QueryType {
    /// All factor queries.
    pub const ALL: [Self; 3] = [
        Self::FactorExposure,
        Self::FactorPnl,
        Self::FactorProportionOfRisk,
    ];

    /// Remote query identifier.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::FactorExposure => "FACTOR_EXPOSURE",
            Self::FactorPnl => "FACTOR_PNL",
            Self::FactorProportionOfRisk => "FACTOR_PROPORTION_OF_RISK",
        }
    }

    /// Human-readable query name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::FactorExposure => "Factor Exposure",
            Self::FactorPnl => "Factor Pnl",
            Self::FactorProportionOfRisk => "Factor Proportion Of Risk",
        }
    }

    /// Field of a [`FactorRecord`](crate::FactorRecord) holding this query's value.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::FactorExposure => "exposure",
            Self::FactorPnl => "pnl",
            Self::FactorProportionOfRisk => "proportionOfRisk",
        }
    }

    /// Camel-cased display name, e.g. `factorExposure`.
    pub fn column_name(&self) -> String {
        let compact: String = self.display_name().split_whitespace().collect();
        let mut chars = compact.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_lowercase().chain(chars).collect()
        })
    }

    /// Look up a query by its remote identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.id() == id)
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Data set to read results from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSet {
    /// End-of-day results
    #[default]
    Eod,
    /// Intraday results
    Intraday,
}

impl DataSet {
    /// Query parameter value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eod => "EOD",
            Self::Intraday => "INTRADAY",
        }
    }
}

/// Options forwarded to a factor data fetch.
///
/// The caller context fields are metadata for the service; they do not change
/// what the client does with the response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Name of the calling function or application
    pub source: Option<String>,
    /// Request intraday rather than end-of-day data
    pub real_time: bool,
    /// Request id for server-side tracing
    pub request_id: Option<String>,
    /// First date to fetch, inclusive
    pub start_date: Option<NaiveDate>,
    /// Last date to fetch, inclusive
    pub end_date: Option<NaiveDate>,
}

impl FetchOptions {
    /// Data set implied by `real_time`.
    pub const fn data_set(&self) -> DataSet {
        if self.real_time {
            DataSet::Intraday
        } else {
            DataSet::Eod
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(QueryType::FactorExposure, "FACTOR_EXPOSURE", "exposure", "factorExposure")]
    #[case(QueryType::FactorPnl, "FACTOR_PNL", "pnl", "factorPnl")]
    #[case(
        QueryType::FactorProportionOfRisk,
        "FACTOR_PROPORTION_OF_RISK",
        "proportionOfRisk",
        "factorProportionOfRisk"
    )]
    fn test_query_type_names(
        #[case] query: QueryType,
        #[case] id: &str,
        #[case] field: &str,
        #[case] column: &str,
    ) {
        assert_eq!(query.id(), id);
        assert_eq!(query.field(), field);
        assert_eq!(query.column_name(), column);
        assert_eq!(QueryType::from_id(id), Some(query));
    }

    #[test]
    fn test_from_id_unknown() {
        assert_eq!(QueryType::from_id("FACTOR_VOLATILITY"), None);
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&QueryType::FactorProportionOfRisk).unwrap();
        assert_eq!(json, "\"FACTOR_PROPORTION_OF_RISK\"");
    }

    #[test]
    fn test_data_set_from_real_time() {
        let eod = FetchOptions::default();
        assert_eq!(eod.data_set(), DataSet::Eod);

        let intraday = FetchOptions {
            real_time: true,
            ..FetchOptions::default()
        };
        assert_eq!(intraday.data_set().as_str(), "INTRADAY");
    }
}
