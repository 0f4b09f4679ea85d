//! Blocking HTTP client for the risk report service.

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::factor::{Factor, FactorRecord, Results};
use crate::query::FetchOptions;
use crate::report::RiskReport;
use crate::service::ReportService;
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Header carrying the calling application name
pub const SOURCE_HEADER: &str = "X-Application";

/// Header carrying the caller's request id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Date format for `startDate` / `endDate` query parameters
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Risk report service client.
///
/// Each call issues exactly one request and never retries.
pub struct ReportClient {
    client: Client,
    config: ClientConfig,
}

impl ReportClient {
    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the base URL is not a valid absolute URL,
    /// or `ApiError::Network` if the HTTP client cannot be built.
    ///
    /// # Example
    /// ```no_run
    /// use factorplot_api::{ClientConfig, ReportClient, ReportService};
    ///
    /// # fn example() -> factorplot_api::Result<()> {
    /// let client = ReportClient::new(ClientConfig::new("https://reports.example.com/v1"))?;
    /// let report = client.get_report("PFR_1234")?;
    /// println!("{} is a {}", report.id, report.report_type());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {:?}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self { client, config })
    }

    /// Create a client configured from the environment.
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Configured service root.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request.send().map_err(ApiError::Network)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!("{what}: {}", status.canonical_reason().unwrap_or("request failed"))
            } else {
                format!("{what}: {}", body.trim())
            };
            warn!(status = status.as_u16(), %what, "report service returned an error");
            return Err(ApiError::from_status(status.as_u16(), message));
        }

        let body = response.text().map_err(ApiError::Network)?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidArgument(format!("Empty {what}")));
    }
    Ok(())
}

impl ReportService for ReportClient {
    fn get_report(&self, report_id: &str) -> Result<RiskReport> {
        require(report_id, "report id")?;

        let url = self.url(&["risk", "reports", report_id])?;
        debug!(%url, report_id, "fetching report");
        self.send(self.get(url), &format!("report {report_id}"))
    }

    fn get_factor(&self, risk_model_id: &str, factor_name: &str) -> Result<Option<Factor>> {
        require(risk_model_id, "risk model id")?;
        require(factor_name, "factor name")?;

        let url = self.url(&["risk", "models", risk_model_id, "factors"])?;
        debug!(%url, risk_model_id, factor_name, "resolving factor");
        let request = self.get(url).query(&[("name", factor_name)]);
        let found: Results<Factor> =
            self.send(request, &format!("factors of risk model {risk_model_id}"))?;

        // The service matches names loosely; only an exact match counts.
        Ok(found
            .results
            .into_iter()
            .find(|factor| factor.name == factor_name))
    }

    fn get_factor_data(
        &self,
        report_id: &str,
        factor_name: &str,
        options: &FetchOptions,
    ) -> Result<Vec<FactorRecord>> {
        require(report_id, "report id")?;
        require(factor_name, "factor name")?;
        if let (Some(start), Some(end)) = (options.start_date, options.end_date) {
            if start > end {
                return Err(ApiError::InvalidArgument(format!(
                    "start date {start} is after end date {end}"
                )));
            }
        }

        let url = self.url(&["risk", "reports", report_id, "results"])?;

        let mut params = vec![
            ("factors", factor_name.to_string()),
            ("dataSet", options.data_set().as_str().to_string()),
        ];
        if let Some(start) = options.start_date {
            params.push(("startDate", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = options.end_date {
            params.push(("endDate", end.format(DATE_FORMAT).to_string()));
        }

        let mut request = self.get(url.clone()).query(&params);
        if let Some(source) = &options.source {
            request = request.header(SOURCE_HEADER, source);
        }
        if let Some(request_id) = &options.request_id {
            request = request.header(REQUEST_ID_HEADER, request_id);
        }

        debug!(%url, report_id, factor_name, data_set = options.data_set().as_str(), "fetching factor data");
        let data: Results<FactorRecord> =
            self.send(request, &format!("results of report {report_id}"))?;
        debug!(report_id, factor_name, records = data.results.len(), "fetched factor data");

        Ok(data.results)
    }
}

impl std::fmt::Debug for ReportClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
