//! Error types for the Walmart Marketplace API client.
//!
//! Every failure surfaces as an [`Error`]. Whether a failure is worth
//! retrying is derived from the variant and, for upstream responses, from
//! the HTTP status code alone.

use thiserror::Error;

/// A specialized `Result` type for Walmart Marketplace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Walmart Marketplace API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed (connect, timeout, reset, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected schema
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream returned a non-success status
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable description of the failed operation
        message: String,
        /// Raw response body as returned by the upstream
        body: String,
    },

    /// Token exchange failed or returned an unusable body
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the upstream HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried.
    ///
    /// Server errors (5xx) and network-level failures are retryable.
    /// Client errors (4xx), authentication failures and schema
    /// validation failures are not.
    ///
    /// # Example
    ///
    /// ```
    /// use walmart_rs::Error;
    ///
    /// let err = Error::Api { status: 503, message: "busy".into(), body: String::new() };
    /// assert!(err.is_retryable());
    ///
    /// let err = Error::Api { status: 404, message: "gone".into(), body: String::new() };
    /// assert!(!err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            Error::Http(err) => !err.is_builder() && !err.is_decode(),
            _ => false,
        }
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (bad request, unknown resource, invalid input).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => (400..500).contains(status),
            Error::InvalidInput(_) | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a failed response.
    pub(crate) fn from_api_response(
        status: u16,
        message: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Error::Api {
            status,
            message: message.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(Error::from_api_response(500, "x", "").is_retryable());
        assert!(Error::from_api_response(503, "x", "").is_retryable());
        assert!(!Error::from_api_response(400, "x", "").is_retryable());
        assert!(!Error::from_api_response(429, "x", "").is_retryable());
        assert!(!Error::InvalidInput("bad".into()).is_retryable());
        assert!(!Error::Authentication("denied".into()).is_retryable());
    }

    #[tokio::test]
    async fn test_network_error_retryable() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err: Error = reqwest::Client::new()
            .get(format!("http://{}/v3/items", addr))
            .send()
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Http(_)));
        assert!(err.is_retryable());
        assert!(err.status().is_none());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_request_builder_error_not_retryable() {
        let err: Error = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Http(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_validation_error_not_retryable() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(!err.is_retryable());
        assert!(err.status().is_none());
    }

    #[test]
    fn test_error_auth() {
        assert!(Error::Authentication("failed".into()).is_auth_error());
        assert!(!Error::from_api_response(401, "x", "").is_auth_error());
    }

    #[test]
    fn test_from_api_response() {
        let err = Error::from_api_response(404, "Error while fetching order", "{\"errors\":[]}");
        match err {
            Error::Api {
                status,
                ref message,
                ref body,
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Error while fetching order");
                assert_eq!(body, "{\"errors\":[]}");
            }
            _ => panic!("Expected Api error"),
        }
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }
}
