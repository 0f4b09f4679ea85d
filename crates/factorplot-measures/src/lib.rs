#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorplot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod extractor;
pub mod metric;
pub mod registry;
pub mod series;

pub use error::{MeasureError, Result};
pub use extractor::{
    FactorDataExtractor, factor_exposure, factor_pnl, factor_proportion_of_risk,
};
pub use metric::{MetricKind, ValueFilter};
pub use registry::{MeasureFn, MeasureRegistry};
pub use series::{DATE_COLUMN, FactorSeries, extract_series, parse_date};
