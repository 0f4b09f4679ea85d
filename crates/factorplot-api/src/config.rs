//! Client configuration loaded from defaults or the environment.

use crate::error::{ApiError, Result};
use std::time::Duration;

/// Default report service base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/v1";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("factorplot/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the base URL
pub const ENV_BASE_URL: &str = "FACTORPLOT_API_URL";

/// Environment variable holding the bearer token
pub const ENV_TOKEN: &str = "FACTORPLOT_API_TOKEN";

/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "FACTORPLOT_TIMEOUT_SECS";

/// Settings for [`ReportClient`](crate::ReportClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Service root, without a trailing slash
    pub base_url: String,
    /// Bearer token, if the service requires one
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent header value
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration pointing at `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from the environment, reading a `.env` file first if present.
    ///
    /// Unset variables fall back to the defaults.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = lookup(ENV_BASE_URL).map_or_else(Self::default, Self::new);
        config.token = lookup(ENV_TOKEN).filter(|t| !t.is_empty());

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("{ENV_TIMEOUT_SECS} must be an integer, got {raw:?}"))
            })?;
            if secs == 0 {
                return Err(ApiError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be greater than zero"
                )));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
