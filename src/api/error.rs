//! Error types for talking to the automation backend.

use std::time::Duration;

use thiserror::Error;

/// Failures raised by a [`Transport`](super::Transport) before a response
/// status is known.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint could not be joined with the configured base URL.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Sending the request or reading the body failed.
    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Connection-level failure reported without a reqwest error.
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Why a fetch attempt did not produce a payload.
///
/// Cloneable so it can be stored inside fetch and view states.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection reset, timeout).
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend answered with a status outside 200-299.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// The body was not the JSON we expected.
    #[error("Decode error: {message}")]
    Decode { message: String },
}

impl FetchError {
    /// Per-attempt timeout expiry. Surfaces as a network failure.
    pub fn timeout(after: Duration) -> Self {
        FetchError::Network {
            message: format!("request timed out after {}ms", after.as_millis()),
        }
    }

    /// Get error type string, stable across versions.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network_error",
            FetchError::Http { .. } => "http_error",
            FetchError::Decode { .. } => "decode_error",
        }
    }

    /// HTTP status for `Http` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable text for toasts and banners.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Network { message } => format!("Cannot reach server: {}", message),
            FetchError::Http { status } => {
                let reason = reqwest::StatusCode::from_u16(*status)
                    .ok()
                    .and_then(|s| s.canonical_reason());
                match reason {
                    Some(reason) => format!("Server returned {} {}", status, reason),
                    None => format!("Server returned {}", status),
                }
            }
            FetchError::Decode { message } => format!("Unexpected response: {}", message),
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        FetchError::Network {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_network_error() {
        let err = FetchError::timeout(Duration::from_millis(1500));
        assert_eq!(err.kind(), "network_error");
        assert!(err.to_string().contains("1500ms"));
    }

    #[test]
    fn test_http_error_message_uses_reason_phrase() {
        let err = FetchError::Http { status: 500 };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.kind(), "http_error");
        assert_eq!(err.user_message(), "Server returned 500 Internal Server Error");
    }

    #[test]
    fn test_transport_error_converts_to_network() {
        let err: FetchError = TransportError::Connection("refused".to_string()).into();
        assert_eq!(
            err,
            FetchError::Network {
                message: "Connection failed: refused".to_string()
            }
        );
    }
}
