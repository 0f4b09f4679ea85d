//! Factor entities and per-date factor results.

use serde::{Deserialize, Serialize};

/// A factor resolved within a risk model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    /// Canonical factor identifier within the risk model
    pub identifier: String,
    /// Canonical factor name
    pub name: String,
    /// Factor category (e.g. "Style", "Industry"), if reported
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Factor {
    /// Create a factor with the given identifier and name.
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            category: None,
        }
    }

    /// Canonical factor name, used to scope data fetches.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One factor result row for a single date.
///
/// Metric fields are optional: the service omits or nulls values it did not
/// compute for that date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorRecord {
    /// Raw date string as sent by the service
    pub date: String,
    /// Factor name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<String>,
    /// Factor category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor_category: Option<String>,
    /// Exposure to the factor
    #[serde(default)]
    pub exposure: Option<f64>,
    /// PnL attributed to the factor
    #[serde(default)]
    pub pnl: Option<f64>,
    /// Share of total risk attributed to the factor
    #[serde(default)]
    pub proportion_of_risk: Option<f64>,
}

impl FactorRecord {
    /// Create a record for `date` with no metric values.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    /// Set the exposure.
    pub const fn with_exposure(mut self, value: f64) -> Self {
        self.exposure = Some(value);
        self
    }

    /// Set the PnL.
    pub const fn with_pnl(mut self, value: f64) -> Self {
        self.pnl = Some(value);
        self
    }

    /// Set the proportion of risk.
    pub const fn with_proportion_of_risk(mut self, value: f64) -> Self {
        self.proportion_of_risk = Some(value);
        self
    }

    /// Look up a metric by its wire field name.
    ///
    /// Returns `None` for unknown fields as well as for absent values.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "exposure" => self.exposure,
            "pnl" => self.pnl,
            "proportionOfRisk" => self.proportion_of_risk,
            _ => None,
        }
    }
}

/// Envelope for list responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Results<T> {
    #[serde(default = "Vec::new")]
    pub(crate) results: Vec<T>,
}
