//! Error types for report service operations.

use thiserror::Error;

/// Result type for report service operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while talking to the report service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code returned by the service
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Credentials missing or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid request argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// Build an error from a non-success status code and response body.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            _ => Self::Http { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_auth_failures() {
        assert!(matches!(
            ApiError::from_status(401, "expired token"),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from_status(403, "forbidden"),
            ApiError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_from_status_maps_not_found() {
        let err = ApiError::from_status(404, "report R1");
        assert_eq!(err.to_string(), "Not found: report R1");
    }

    #[test]
    fn test_from_status_keeps_other_codes() {
        let err = ApiError::from_status(502, "bad gateway");
        assert!(matches!(err, ApiError::Http { status: 502, .. }));
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
    }
}
