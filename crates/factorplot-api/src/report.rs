//! Report entities returned by the report service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of entity a measure can be plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A report, e.g. a factor risk report
    Report,
    /// A portfolio
    Portfolio,
    /// A single asset
    Asset,
    /// A risk model
    RiskModel,
}

impl EntityType {
    /// Name used by the service for this entity type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Portfolio => "portfolio",
            Self::Asset => "asset",
            Self::RiskModel => "risk_model",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a report, serialized by its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportType {
    /// Portfolio Performance Analytics
    PortfolioPerformanceAnalytics,
    /// Portfolio Factor Risk
    PortfolioFactorRisk,
    /// Asset Factor Risk
    AssetFactorRisk,
    /// Portfolio Aging
    PortfolioAging,
    /// Portfolio Thematic Analytics
    PortfolioThematicAnalytics,
    /// Asset Thematic Analytics
    AssetThematicAnalytics,
    /// Analytics
    Analytics,
    /// Risk Calculation
    RiskCalculation,
    /// Any type this crate does not know about
    Other(String),
}

impl ReportType {
    /// Display name used on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::PortfolioPerformanceAnalytics => "Portfolio Performance Analytics",
            Self::PortfolioFactorRisk => "Portfolio Factor Risk",
            Self::AssetFactorRisk => "Asset Factor Risk",
            Self::PortfolioAging => "Portfolio Aging",
            Self::PortfolioThematicAnalytics => "Portfolio Thematic Analytics",
            Self::AssetThematicAnalytics => "Asset Thematic Analytics",
            Self::Analytics => "Analytics",
            Self::RiskCalculation => "Risk Calculation",
            Self::Other(name) => name,
        }
    }

    /// Whether this report carries factor risk results.
    pub const fn is_factor_risk(&self) -> bool {
        matches!(self, Self::PortfolioFactorRisk | Self::AssetFactorRisk)
    }
}

impl From<String> for ReportType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Portfolio Performance Analytics" => Self::PortfolioPerformanceAnalytics,
            "Portfolio Factor Risk" => Self::PortfolioFactorRisk,
            "Asset Factor Risk" => Self::AssetFactorRisk,
            "Portfolio Aging" => Self::PortfolioAging,
            "Portfolio Thematic Analytics" => Self::PortfolioThematicAnalytics,
            "Asset Thematic Analytics" => Self::AssetThematicAnalytics,
            "Analytics" => Self::Analytics,
            "Risk Calculation" => Self::RiskCalculation,
            _ => Self::Other(name),
        }
    }
}

impl From<ReportType> for String {
    fn from(report_type: ReportType) -> Self {
        match report_type {
            ReportType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report parameters relevant to factor risk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParameters {
    /// Risk model the report was computed with
    #[serde(default)]
    pub risk_model: Option<String>,
}

/// A report as returned by the report lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Report identifier
    pub id: String,
    /// Report type
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// Report parameters
    #[serde(default)]
    pub parameters: ReportParameters,
}

impl RiskReport {
    /// Create a report with the given id, type and optional risk model.
    pub fn new(
        id: impl Into<String>,
        report_type: ReportType,
        risk_model_id: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            report_type,
            parameters: ReportParameters {
                risk_model: risk_model_id.map(str::to_string),
            },
        }
    }

    /// Report type.
    pub const fn report_type(&self) -> &ReportType {
        &self.report_type
    }

    /// Identifier of the associated risk model, if any.
    pub fn risk_model_id(&self) -> Option<&str> {
        self.parameters.risk_model.as_deref()
    }
}
