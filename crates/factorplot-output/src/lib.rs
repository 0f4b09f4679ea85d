#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorplot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;

pub use export::{
    ExportError, ExportFormat, Exporter, FactorPanel, PanelRow, SeriesExport, SeriesPoint,
};
