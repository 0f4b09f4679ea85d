//! Factor timeseries extraction from factor risk reports.

use crate::error::{MeasureError, Result};
use crate::metric::{MetricKind, ValueFilter};
use crate::series::{FactorSeries, parse_date};
use factorplot_api::{FetchOptions, ReportService};
use tracing::debug;

/// Extracts per-date factor metrics from factor risk reports.
///
/// Every extraction performs one report lookup, one factor lookup and one data
/// fetch against the wrapped service. Nothing is cached between calls.
pub struct FactorDataExtractor<S> {
    service: S,
    filter: ValueFilter,
}

impl<S: ReportService> FactorDataExtractor<S> {
    /// Wrap a report service, dropping absent and zero values.
    pub const fn new(service: S) -> Self {
        Self {
            service,
            filter: ValueFilter::Truthy,
        }
    }

    /// Replace the value filter.
    pub fn with_filter(mut self, filter: ValueFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Active value filter.
    pub const fn filter(&self) -> ValueFilter {
        self.filter
    }

    /// Factor exposure timeseries for `factor_name` in a factor risk report.
    pub fn factor_exposure(
        &self,
        report_id: &str,
        factor_name: &str,
        options: &FetchOptions,
    ) -> Result<FactorSeries> {
        self.extract(report_id, factor_name, MetricKind::Exposure, options)
    }

    /// Factor PnL timeseries for `factor_name` in a factor risk report.
    pub fn factor_pnl(
        &self,
        report_id: &str,
        factor_name: &str,
        options: &FetchOptions,
    ) -> Result<FactorSeries> {
        self.extract(report_id, factor_name, MetricKind::Pnl, options)
    }

    /// Factor proportion of risk timeseries for `factor_name` in a factor risk report.
    pub fn factor_proportion_of_risk(
        &self,
        report_id: &str,
        factor_name: &str,
        options: &FetchOptions,
    ) -> Result<FactorSeries> {
        self.extract(report_id, factor_name, MetricKind::ProportionOfRisk, options)
    }

    /// Extract one metric for one factor.
    ///
    /// # Errors
    /// - `InvalidReportType` if the report is not a factor risk report
    /// - `MissingRiskModel` if the report names no risk model
    /// - `UnknownFactor` if the risk model has no factor called `factor_name`
    /// - `MalformedDate` if a kept result has an unparseable date
    /// - `Api` for any failure of the underlying service
    ///
    /// No data is fetched when one of the first three checks fails.
    pub fn extract(
        &self,
        report_id: &str,
        factor_name: &str,
        metric: MetricKind,
        options: &FetchOptions,
    ) -> Result<FactorSeries> {
        let report = self.service.get_report(report_id)?;
        if !report.report_type().is_factor_risk() {
            return Err(MeasureError::InvalidReportType {
                report_id: report_id.to_string(),
                report_type: report.report_type().clone(),
            });
        }

        let risk_model_id =
            report
                .risk_model_id()
                .ok_or_else(|| MeasureError::MissingRiskModel {
                    report_id: report_id.to_string(),
                })?;
        let factor = self
            .service
            .get_factor(risk_model_id, factor_name)?
            .ok_or_else(|| MeasureError::UnknownFactor {
                factor_name: factor_name.to_string(),
                risk_model_id: risk_model_id.to_string(),
            })?;

        let field = metric.field();
        let records = self
            .service
            .get_factor_data(report_id, factor.name(), options)?;
        let fetched = records.len();

        let points = records
            .iter()
            .filter_map(|record| {
                self.filter
                    .keep(record.field(field))
                    .map(|value| (record, value))
            })
            .map(|(record, value)| {
                parse_date(&record.date)
                    .map(|date| (date, value))
                    .ok_or_else(|| MeasureError::MalformedDate {
                        value: record.date.clone(),
                        factor_name: factor.name().to_string(),
                        query: metric.query_type(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            report_id,
            factor = factor.name(),
            field,
            fetched,
            kept = points.len(),
            "extracted factor series"
        );

        Ok(FactorSeries::from_points(metric.query_type(), points))
    }
}

impl<S> std::fmt::Debug for FactorDataExtractor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactorDataExtractor")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

/// Factor exposure timeseries for a factor in a factor risk report.
pub fn factor_exposure(
    service: &dyn ReportService,
    report_id: &str,
    factor_name: &str,
    options: &FetchOptions,
) -> Result<FactorSeries> {
    FactorDataExtractor::new(service).factor_exposure(report_id, factor_name, options)
}

/// Factor PnL timeseries for a factor in a factor risk report.
pub fn factor_pnl(
    service: &dyn ReportService,
    report_id: &str,
    factor_name: &str,
    options: &FetchOptions,
) -> Result<FactorSeries> {
    FactorDataExtractor::new(service).factor_pnl(report_id, factor_name, options)
}

/// Factor proportion of risk timeseries for a factor in a factor risk report.
pub fn factor_proportion_of_risk(
    service: &dyn ReportService,
    report_id: &str,
    factor_name: &str,
    options: &FetchOptions,
) -> Result<FactorSeries> {
    FactorDataExtractor::new(service).factor_proportion_of_risk(report_id, factor_name, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use factorplot_api::{ApiError, Factor, FactorRecord, ReportType, RiskReport};
    use std::cell::RefCell;

    /// In-memory service with one risk model, recording every call.
    struct FakeService {
        report: RiskReport,
        factors: Vec<Factor>,
        records: Vec<FactorRecord>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeService {
        fn new(report_type: ReportType, records: Vec<FactorRecord>) -> Self {
            Self {
                report: RiskReport::new("PFR1", report_type, Some("AXUS4M")),
                factors: vec![Factor::new("F_BETA", "Beta")],
                records,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl ReportService for FakeService {
        fn get_report(&self, report_id: &str) -> factorplot_api::Result<RiskReport> {
            self.calls.borrow_mut().push(format!("report:{report_id}"));
            if report_id == self.report.id {
                Ok(self.report.clone())
            } else {
                Err(ApiError::NotFound(format!("report {report_id}")))
            }
        }

        fn get_factor(
            &self,
            risk_model_id: &str,
            factor_name: &str,
        ) -> factorplot_api::Result<Option<Factor>> {
            self.calls
                .borrow_mut()
                .push(format!("factor:{risk_model_id}:{factor_name}"));
            Ok(self.factors.iter().find(|f| f.name == factor_name).cloned())
        }

        fn get_factor_data(
            &self,
            report_id: &str,
            factor_name: &str,
            _options: &FetchOptions,
        ) -> factorplot_api::Result<Vec<FactorRecord>> {
            self.calls
                .borrow_mut()
                .push(format!("data:{report_id}:{factor_name}"));
            Ok(self.records.clone())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_records() -> Vec<FactorRecord> {
        vec![
            FactorRecord::new("2021-01-01").with_exposure(1.5),
            FactorRecord::new("2021-01-02").with_exposure(0.0),
            FactorRecord::new("2021-01-03").with_exposure(2.25),
        ]
    }

    #[test]
    fn test_exposure_drops_zero_values() {
        let service = FakeService::new(ReportType::PortfolioFactorRisk, sample_records());
        let series = FactorDataExtractor::new(&service)
            .factor_exposure("PFR1", "Beta", &FetchOptions::default())
            .unwrap();

        assert_eq!(series.dates(), &[date(2021, 1, 1), date(2021, 1, 3)]);
        assert_relative_eq!(series.values()[0], 1.5);
        assert_relative_eq!(series.values()[1], 2.25);
        assert_eq!(series.label(), "exposure");
    }

    #[test]
    fn test_present_filter_keeps_zero_values() {
        let service = FakeService::new(ReportType::AssetFactorRisk, sample_records());
        let series = FactorDataExtractor::new(&service)
            .with_filter(ValueFilter::Present)
            .factor_exposure("PFR1", "Beta", &FetchOptions::default())
            .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.get(date(2021, 1, 2)), Some(0.0));
    }

    #[test]
    fn test_performs_one_call_per_step() {
        let service = FakeService::new(ReportType::PortfolioFactorRisk, sample_records());
        factor_pnl(&service, "PFR1", "Beta", &FetchOptions::default()).unwrap();

        assert_eq!(
            service.calls(),
            vec!["report:PFR1", "factor:AXUS4M:Beta", "data:PFR1:Beta"]
        );
    }

    #[test]
    fn test_invalid_report_type_skips_fetch() {
        let service = FakeService::new(ReportType::PortfolioPerformanceAnalytics, sample_records());
        let result = factor_exposure(&service, "PFR1", "Beta", &FetchOptions::default());

        assert!(matches!(
            result,
            Err(MeasureError::InvalidReportType {
                report_type: ReportType::PortfolioPerformanceAnalytics,
                ..
            })
        ));
        assert_eq!(service.calls(), vec!["report:PFR1"]);
    }

    #[test]
    fn test_unknown_factor_skips_fetch() {
        let service = FakeService::new(ReportType::PortfolioFactorRisk, sample_records());
        let result = factor_exposure(&service, "PFR1", "Astrology", &FetchOptions::default());

        match result {
            Err(MeasureError::UnknownFactor {
                factor_name,
                risk_model_id,
            }) => {
                assert_eq!(factor_name, "Astrology");
                assert_eq!(risk_model_id, "AXUS4M");
            }
            other => panic!("expected UnknownFactor, got {other:?}"),
        }
        assert!(!service.calls().iter().any(|c| c.starts_with("data:")));
    }

    #[test]
    fn test_missing_risk_model() {
        let mut service = FakeService::new(ReportType::AssetFactorRisk, sample_records());
        service.report = RiskReport::new("PFR1", ReportType::AssetFactorRisk, None);

        let result = factor_exposure(&service, "PFR1", "Beta", &FetchOptions::default());
        assert!(matches!(result, Err(MeasureError::MissingRiskModel { .. })));
        assert_eq!(service.calls(), vec!["report:PFR1"]);
    }

    #[test]
    fn test_upstream_error_passes_through() {
        let service = FakeService::new(ReportType::PortfolioFactorRisk, sample_records());
        let result = factor_exposure(&service, "NOPE", "Beta", &FetchOptions::default());

        match result {
            Err(MeasureError::Api(ApiError::NotFound(message))) => {
                assert_eq!(message, "report NOPE");
            }
            other => panic!("expected Api(NotFound), got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_date() {
        let records = vec![
            FactorRecord::new("2021-01-01").with_pnl(10.0),
            FactorRecord::new("01/02/2021?").with_pnl(12.0),
        ];
        let service = FakeService::new(ReportType::PortfolioFactorRisk, records);
        let result = factor_pnl(&service, "PFR1", "Beta", &FetchOptions::default());

        assert!(matches!(
            result,
            Err(MeasureError::MalformedDate { ref value, .. }) if value == "01/02/2021?"
        ));
    }

    #[test]
    fn test_malformed_date_on_dropped_record_is_ignored() {
        let records = vec![
            FactorRecord::new("2021-01-01").with_pnl(10.0),
            FactorRecord::new("not a date"),
        ];
        let service = FakeService::new(ReportType::PortfolioFactorRisk, records);
        let series = factor_pnl(&service, "PFR1", "Beta", &FetchOptions::default()).unwrap();

        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_output_is_sorted() {
        let records = vec![
            FactorRecord::new("2021-03-01").with_proportion_of_risk(0.3),
            FactorRecord::new("2021-01-01").with_proportion_of_risk(0.1),
            FactorRecord::new("2021-02-01").with_proportion_of_risk(0.2),
        ];
        let service = FakeService::new(ReportType::PortfolioFactorRisk, records);
        let series =
            factor_proportion_of_risk(&service, "PFR1", "Beta", &FetchOptions::default()).unwrap();

        assert_eq!(
            series.dates(),
            &[date(2021, 1, 1), date(2021, 2, 1), date(2021, 3, 1)]
        );
        assert_eq!(series.values(), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_empty_results_give_empty_series() {
        let service = FakeService::new(ReportType::PortfolioFactorRisk, Vec::new());
        let series = factor_exposure(&service, "PFR1", "Beta", &FetchOptions::default()).unwrap();

        assert!(series.is_empty());
        assert_eq!(series.label(), "exposure");
    }
}
