//! The report service contract.

use crate::error::Result;
use crate::factor::{Factor, FactorRecord};
use crate::query::FetchOptions;
use crate::report::RiskReport;

/// Read access to risk reports, risk model factors and factor results.
///
/// [`ReportClient`](crate::ReportClient) implements this over HTTP. Errors are
/// returned as-is to callers; implementations must not retry.
pub trait ReportService {
    /// Look up a report by id.
    fn get_report(&self, report_id: &str) -> Result<RiskReport>;

    /// Resolve `factor_name` within a risk model.
    ///
    /// Returns `Ok(None)` if the model has no factor with that name.
    fn get_factor(&self, risk_model_id: &str, factor_name: &str) -> Result<Option<Factor>>;

    /// Fetch every per-date result for one factor of a report.
    fn get_factor_data(
        &self,
        report_id: &str,
        factor_name: &str,
        options: &FetchOptions,
    ) -> Result<Vec<FactorRecord>>;
}

impl<S: ReportService + ?Sized> ReportService for &S {
    fn get_report(&self, report_id: &str) -> Result<RiskReport> {
        (**self).get_report(report_id)
    }

    fn get_factor(&self, risk_model_id: &str, factor_name: &str) -> Result<Option<Factor>> {
        (**self).get_factor(risk_model_id, factor_name)
    }

    fn get_factor_data(
        &self,
        report_id: &str,
        factor_name: &str,
        options: &FetchOptions,
    ) -> Result<Vec<FactorRecord>> {
        (**self).get_factor_data(report_id, factor_name, options)
    }
}
