/*
[INPUT]:  Error sources (transport, upstream API, serialization, auth)
[OUTPUT]: Structured error types with auth and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the B2BinPay adapter
#[derive(Error, Debug)]
pub enum B2BinPayError {
    /// Key or secret was empty at construction or connect time
    #[error("Invalid credentials: key and secret must be non-empty")]
    InvalidCredentials,

    /// No stored key/secret to authenticate with
    #[error("No credentials configured, cannot authenticate")]
    NoCredentials,

    /// Login response failed the HMAC authenticity check
    #[error("Login response signature mismatch")]
    SignatureMismatch,

    /// Refresh token expired or the refresh attempt failed
    #[error("Session expired: {reason}")]
    SessionExpired { reason: String },

    /// Network or HTTP-layer failure
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote returned a non-2xx status
    #[error("Upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response was well-formed JSON but not what the protocol requires
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session snapshot file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl B2BinPayError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            B2BinPayError::Transport(err) => err.is_timeout() || err.is_connect(),
            B2BinPayError::Upstream { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            _ => false,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        match self {
            B2BinPayError::InvalidCredentials
            | B2BinPayError::NoCredentials
            | B2BinPayError::SignatureMismatch
            | B2BinPayError::SessionExpired { .. } => true,
            B2BinPayError::Upstream { status, .. } => {
                *status == StatusCode::UNAUTHORIZED.as_u16()
            }
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            B2BinPayError::Upstream { status, .. } => Some(*status),
            B2BinPayError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create an upstream error from status code and body
    pub fn upstream(status: StatusCode, body: impl Into<String>) -> Self {
        B2BinPayError::Upstream {
            status: status.as_u16(),
            body: body.into(),
        }
    }

    pub(crate) fn session_expired(reason: impl Into<String>) -> Self {
        B2BinPayError::SessionExpired {
            reason: reason.into(),
        }
    }
}

/// Result type alias for B2BinPay operations
pub type Result<T> = std::result::Result<T, B2BinPayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let upstream = B2BinPayError::upstream(StatusCode::SERVICE_UNAVAILABLE, "down");
        assert!(upstream.is_retryable());

        let throttled = B2BinPayError::upstream(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(throttled.is_retryable());

        assert!(!B2BinPayError::SignatureMismatch.is_retryable());
        assert!(!B2BinPayError::upstream(StatusCode::BAD_REQUEST, "bad").is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(B2BinPayError::SignatureMismatch.is_auth_error());
        assert!(B2BinPayError::NoCredentials.is_auth_error());
        assert!(B2BinPayError::session_expired("refresh failed").is_auth_error());
        assert!(B2BinPayError::upstream(StatusCode::UNAUTHORIZED, "").is_auth_error());
        assert!(!B2BinPayError::upstream(StatusCode::NOT_FOUND, "").is_auth_error());
    }

    #[test]
    fn test_upstream_error_creation() {
        let err = B2BinPayError::upstream(StatusCode::BAD_REQUEST, "Invalid wallet");
        assert_eq!(err.status(), Some(400));
        match err {
            B2BinPayError::Upstream { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "Invalid wallet");
            }
            _ => panic!("Expected Upstream error variant"),
        }
    }
}
