//! Error types for factor measures.

use factorplot_api::{ApiError, EntityType, QueryType, ReportType};
use thiserror::Error;

/// Result type for factor measures.
pub type Result<T> = std::result::Result<T, MeasureError>;

/// Errors that can occur while extracting a factor measure.
#[derive(Debug, Error)]
pub enum MeasureError {
    /// The report exists but does not carry factor risk results
    #[error("Report {report_id} is a {report_type} report, not a factor risk report")]
    InvalidReportType {
        /// Report that was requested
        report_id: String,
        /// Its actual type
        report_type: ReportType,
    },

    /// The factor is not part of the report's risk model
    #[error("Factor {factor_name:?} is not available in risk model {risk_model_id}")]
    UnknownFactor {
        /// Factor name that was requested
        factor_name: String,
        /// Risk model associated with the report
        risk_model_id: String,
    },

    /// A factor risk report without a risk model
    #[error("Report {report_id} has no associated risk model")]
    MissingRiskModel {
        /// Report that was requested
        report_id: String,
    },

    /// A result date that is not a calendar date
    #[error("Malformed date {value:?} in {query} results for factor {factor_name:?}")]
    MalformedDate {
        /// Raw date string
        value: String,
        /// Factor whose results contained it
        factor_name: String,
        /// Query being extracted
        query: QueryType,
    },

    /// The frame has no column for the requested query
    #[error("Column {0:?} not found in frame")]
    MissingColumn(String),

    /// No measure is registered for the entity/query pair
    #[error("No measure registered for {entity} {query}")]
    UnregisteredMeasure {
        /// Entity type
        entity: EntityType,
        /// Query type
        query: QueryType,
    },

    /// Report service failure, passed through unchanged
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
