//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level. A request that
/// produced a complete HTTP response, whatever its status, is not an
/// `HttpError`.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS handshake failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// Only possible when a timeout was configured on the client.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed (e.g. TLS backend failure).
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A status line arrived but the response body could not be read.
    #[error("Failed to read response body (HTTP {status}): {source}")]
    Body {
        /// Status of the truncated response
        status: http::StatusCode,
        /// Underlying read failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl HttpError {
    /// Returns the response status, if one was received before the failure.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Body { status, .. } => Some(*status),
            Self::Connection(_) | Self::Timeout | Self::InvalidUrl(_) | Self::Build(_) => None,
        }
    }
}
