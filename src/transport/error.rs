//! Error types for the HTTP transport.

use thiserror::Error;

/// Error type for transport operations.
///
/// Describes what went wrong on the wire before any HTTP status was
/// received. The dispatcher classifies these into the crate-level
/// [`Error`](crate::Error) taxonomy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// unreachable hosts and TLS handshake errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// Either the connect timeout or the read timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built (bad URL, header or body).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl HttpError {
    /// Wraps an arbitrary error as a connection failure.
    pub fn connection<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection(Box::new(source))
    }
}
