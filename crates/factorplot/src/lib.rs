#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorplot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export main types from sub-crates
pub use factorplot_api as api;
pub use factorplot_measures as measures;
pub use factorplot_output as output;

pub use factorplot_api::{ClientConfig, FetchOptions, QueryType, ReportClient, ReportService};
pub use factorplot_measures::{
    FactorDataExtractor, FactorSeries, MeasureError, MeasureRegistry, MetricKind, ValueFilter,
    factor_exposure, factor_pnl, factor_proportion_of_risk,
};
pub use factorplot_output::{ExportFormat, Exporter, FactorPanel};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
