#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorplot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod factor;
pub mod query;
pub mod report;
pub mod service;

pub use client::ReportClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use factor::{Factor, FactorRecord};
pub use query::{DataSet, FetchOptions, QueryType};
pub use report::{EntityType, ReportParameters, ReportType, RiskReport};
pub use service::ReportService;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
