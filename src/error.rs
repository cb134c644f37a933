//! Error taxonomy for the client core.
//!
//! Errors are classified at the transport boundary so the rest of the crate
//! can decide what to do without holding on to `reqwest::Error` values. This
//! keeps every variant `Clone`, which the query cache relies on when it
//! broadcasts one fetch result to several deduplicated waiters.

use serde::{Deserialize, Serialize};

/// Rough classification of a failed network exchange.
///
/// Anything that never produced an HTTP response lands here. DNS failures
/// surface through the connect path in reqwest, so they map to `Connect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkErrorKind {
    /// Connection refused, reset, or name resolution failure.
    Connect,
    /// The request exceeded its deadline.
    Timeout,
    /// Everything else (malformed request, body stream error, ...).
    Other,
}

impl std::fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            NetworkErrorKind::Connect => "connect",
            NetworkErrorKind::Timeout => "timeout",
            NetworkErrorKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// Errors surfaced by the API client, cache, and resource modules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected our credentials. The session has already been
    /// cleared and the rejection event emitted by the time this is returned.
    #[error("authentication rejected by backend")]
    Unauthorized,

    /// A read was attempted without an authenticated session. Never touches
    /// the network.
    #[error("no authenticated session")]
    NotAuthenticated,

    /// The request never produced an HTTP response.
    #[error("network error ({kind}): {message}")]
    Network {
        kind: NetworkErrorKind,
        message: String,
    },

    /// The backend answered with a non-success status. The body is carried
    /// verbatim so callers can surface the backend's own message.
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },

    /// The response arrived but could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a transport-level reqwest failure.
    pub fn transport(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            NetworkErrorKind::Timeout
        } else if err.is_connect() {
            NetworkErrorKind::Connect
        } else {
            NetworkErrorKind::Other
        };
        ApiError::Network {
            kind,
            message: err.to_string(),
        }
    }

    /// True when the request never reached the backend.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    /// Short outcome label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "unauthorized",
            ApiError::NotAuthenticated => "not_authenticated",
            ApiError::Network { .. } => "network_error",
            ApiError::Status { .. } => "http_error",
            ApiError::Decode(_) => "decode_error",
        }
    }
}
