//! Error types for billing.io client operations.

use std::fmt::Display;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error types for billing.io client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API answered with a non-2xx status.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The transport failed before a response was received.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON serialization/deserialization errors.
    #[error("Serde JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// URL parse errors.
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// Errors while assembling an HTTP request.
    #[error("HTTP error: {0}")]
    HttpError(#[from] http::Error),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl Error {
    /// Returns the structured API error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.as_api_error().is_some_and(ApiError::is_not_found)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.as_api_error().is_some_and(ApiError::is_rate_limited)
    }

    pub fn is_auth_error(&self) -> bool {
        self.as_api_error().is_some_and(ApiError::is_auth_error)
    }
}

/// A specialized `Result` type for billing.io client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A structured API error returned by billing.io.
///
/// Fields the server leaves out decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// High-level error category, e.g. `invalid_request` or `not_found`.
    #[serde(rename = "type", default)]
    pub error_type: String,
    /// Machine-readable error code, e.g. `checkout_not_found`.
    #[serde(default)]
    pub code: String,
    /// HTTP status code of the response.
    #[serde(skip)]
    pub status_code: u16,
    /// Human-readable explanation.
    #[serde(default)]
    pub message: String,
    /// The request parameter that caused the error, if applicable.
    #[serde(default)]
    pub param: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiError>,
}

impl ApiError {
    /// Decode an error response body.
    ///
    /// Bodies without an `error` object are reported as an `internal_error`
    /// carrying the raw body.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope { error: Some(err) }) => ApiError {
                status_code: status.as_u16(),
                ..err
            },
            _ => ApiError {
                error_type: "internal_error".to_string(),
                code: "unknown".to_string(),
                status_code: status.as_u16(),
                message: format!(
                    "unexpected error (HTTP {}): {}",
                    status.as_u16(),
                    String::from_utf8_lossy(body)
                ),
                param: None,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.error_type == "not_found"
    }

    pub fn is_rate_limited(&self) -> bool {
        self.error_type == "rate_limited"
    }

    pub fn is_auth_error(&self) -> bool {
        self.error_type == "authentication_error"
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (code={}, status={})",
            self.message, self.code, self.status_code
        )?;
        if let Some(param) = &self.param {
            write!(f, ", param={param}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_envelope() {
        let body = br#"{"error":{"type":"not_found","code":"checkout_not_found","message":"No such checkout","param":"checkout_id"}}"#;

        let err = ApiError::from_response(StatusCode::NOT_FOUND, body);

        assert_eq!(err.error_type, "not_found");
        assert_eq!(err.code, "checkout_not_found");
        assert_eq!(err.status_code, 404);
        assert_eq!(err.param.as_deref(), Some("checkout_id"));
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "No such checkout (code=checkout_not_found, status=404), param=checkout_id"
        );
    }

    #[test]
    fn test_decode_non_envelope_body() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, b"upstream down");

        assert_eq!(err.error_type, "internal_error");
        assert_eq!(err.code, "unknown");
        assert_eq!(err.status_code, 502);
        assert_eq!(err.message, "unexpected error (HTTP 502): upstream down");
        assert!(err.param.is_none());
    }

    #[test]
    fn test_envelope_without_error_field_falls_back() {
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, b"{}");
        assert_eq!(err.error_type, "internal_error");

        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error":null}"#);
        assert_eq!(err.error_type, "internal_error");

        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error":"boom"}"#);
        assert_eq!(err.error_type, "internal_error");
        assert_eq!(err.code, "unknown");
    }

    #[test]
    fn test_partial_error_object_keeps_type() {
        let body = br#"{"error":{"type":"not_found","message":"No such checkout"}}"#;

        let err = ApiError::from_response(StatusCode::NOT_FOUND, body);

        assert_eq!(err.error_type, "not_found");
        assert_eq!(err.code, "");
        assert_eq!(err.message, "No such checkout");
        assert_eq!(err.status_code, 404);
        assert!(err.is_not_found());
        assert!(Error::Api(err).is_not_found());
    }

    #[test]
    fn test_empty_error_object_is_not_a_fallback() {
        let err = ApiError::from_response(StatusCode::TOO_MANY_REQUESTS, br#"{"error":{"type":"rate_limited"}}"#);

        assert!(err.is_rate_limited());
        assert_eq!(err.message, "");
        assert!(err.param.is_none());
    }

    #[test]
    fn test_error_predicates() {
        let rate_limited = Error::Api(ApiError::from_response(
            StatusCode::TOO_MANY_REQUESTS,
            br#"{"error":{"type":"rate_limited","code":"too_many_requests","message":"slow down"}}"#,
        ));
        assert!(rate_limited.is_rate_limited());
        assert!(!rate_limited.is_not_found());

        let auth = Error::Api(ApiError::from_response(
            StatusCode::UNAUTHORIZED,
            br#"{"error":{"type":"authentication_error","code":"invalid_api_key","message":"bad key"}}"#,
        ));
        assert!(auth.is_auth_error());

        let other = Error::InvalidBaseUrl("mailto:x".to_string());
        assert!(!other.is_auth_error());
        assert!(other.as_api_error().is_none());
    }
}
