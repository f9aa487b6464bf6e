//! Error taxonomy shared by the dispatcher and the webhook verifier.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Message used when an error response carries no usable text.
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Details of a failed API call that produced an HTTP response.
///
/// `status` is `None` only for the local missing-credentials check,
/// which fails before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// Human-readable message, taken from the response body when present
    pub message: String,
    /// HTTP status code of the response
    pub status: Option<u16>,
    /// Machine-readable error code from the response body, if any
    pub code: Option<String>,
    /// Parsed response body (`None` if empty or not JSON)
    pub details: Option<Value>,
}

impl ApiFailure {
    /// Builds a failure from a response status and its parsed body.
    ///
    /// The message comes from the body's `message` field, then its `error`
    /// field, falling back to [`FALLBACK_MESSAGE`].
    #[must_use]
    pub fn from_response(status: u16, details: Option<Value>) -> Self {
        let message = details
            .as_ref()
            .and_then(|body| string_field(body, "message").or_else(|| string_field(body, "error")))
            .unwrap_or(FALLBACK_MESSAGE)
            .to_string();
        let code = details
            .as_ref()
            .and_then(|body| string_field(body, "code"))
            .map(ToString::to_string);

        Self {
            message,
            status: Some(status),
            code,
            details,
        }
    }

    /// Builds a failure that never reached the network.
    #[must_use]
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
            details: None,
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {status})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

fn string_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.as_object()?.get(key)?.as_str()
}

/// Every failure the client or verifier can report.
///
/// Callers branch on the variant (or [`Error::kind`]) to decide whether a
/// failure is recoverable. The crate itself never retries.
#[derive(Debug, Error)]
pub enum Error {
    /// The server could not be reached (DNS, refused, unreachable, TLS,
    /// or any other unclassified transport failure).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The connect or read timeout elapsed.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// A successful response carried a body that is not valid JSON.
    #[error("Failed to parse response: {0}")]
    ResponseParsing(String),

    /// HTTP 400.
    #[error("Validation error: {0}")]
    Validation(ApiFailure),

    /// HTTP 401/403, or no API key configured.
    #[error("Authentication error: {0}")]
    Authentication(ApiFailure),

    /// HTTP 404.
    #[error("Not found: {0}")]
    NotFound(ApiFailure),

    /// HTTP 429. Backing off is up to the caller.
    #[error("Rate limited: {0}")]
    RateLimit(ApiFailure),

    /// HTTP 5xx.
    #[error("Server error: {0}")]
    Server(ApiFailure),

    /// Any other non-success status.
    #[error("API error: {0}")]
    Api(ApiFailure),

    /// The webhook signature could not be verified.
    #[error("Webhook verification failed: {0}")]
    WebhookVerification(String),

    /// The webhook was authentic but its payload is malformed.
    #[error("Invalid webhook: {0}")]
    InvalidWebhook(String),
}

/// Discriminant of [`Error`], convenient for matching and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Connection,
    Timeout,
    ResponseParsing,
    Validation,
    Authentication,
    NotFound,
    RateLimit,
    Server,
    Api,
    WebhookVerification,
    InvalidWebhook,
}

impl ErrorKind {
    /// Stable name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connection => "ConnectionError",
            Self::Timeout => "TimeoutError",
            Self::ResponseParsing => "ResponseParsingError",
            Self::Validation => "ValidationError",
            Self::Authentication => "AuthenticationError",
            Self::NotFound => "NotFoundError",
            Self::RateLimit => "RateLimitError",
            Self::Server => "ServerError",
            Self::Api => "ApiError",
            Self::WebhookVerification => "WebhookVerificationError",
            Self::InvalidWebhook => "InvalidWebhookError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Maps a non-success status and its parsed body to the matching kind.
    ///
    /// | Status   | Variant           |
    /// |----------|-------------------|
    /// | 400      | `Validation`      |
    /// | 401, 403 | `Authentication`  |
    /// | 404      | `NotFound`        |
    /// | 429      | `RateLimit`       |
    /// | 500–599  | `Server`          |
    /// | other    | `Api`             |
    #[must_use]
    pub fn from_status(status: u16, details: Option<Value>) -> Self {
        let failure = ApiFailure::from_response(status, details);
        match status {
            400 => Self::Validation(failure),
            401 | 403 => Self::Authentication(failure),
            404 => Self::NotFound(failure),
            429 => Self::RateLimit(failure),
            500..=599 => Self::Server(failure),
            _ => Self::Api(failure),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) => ErrorKind::Connection,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::ResponseParsing(_) => ErrorKind::ResponseParsing,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::Server(_) => ErrorKind::Server,
            Self::Api(_) => ErrorKind::Api,
            Self::WebhookVerification(_) => ErrorKind::WebhookVerification,
            Self::InvalidWebhook(_) => ErrorKind::InvalidWebhook,
        }
    }

    /// Returns the API failure details for HTTP-derived kinds.
    #[must_use]
    pub const fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            Self::Validation(failure)
            | Self::Authentication(failure)
            | Self::NotFound(failure)
            | Self::RateLimit(failure)
            | Self::Server(failure)
            | Self::Api(failure) => Some(failure),
            Self::Connection(_)
            | Self::Timeout(_)
            | Self::ResponseParsing(_)
            | Self::WebhookVerification(_)
            | Self::InvalidWebhook(_) => None,
        }
    }

    /// Returns the bare message, without the kind prefix used by `Display`.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Connection(message)
            | Self::Timeout(message)
            | Self::ResponseParsing(message)
            | Self::WebhookVerification(message)
            | Self::InvalidWebhook(message) => message,
            Self::Validation(failure)
            | Self::Authentication(failure)
            | Self::NotFound(failure)
            | Self::RateLimit(failure)
            | Self::Server(failure)
            | Self::Api(failure) => &failure.message,
        }
    }

    /// Returns the HTTP status, if the error came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.api_failure().and_then(|failure| failure.status)
    }

    /// Returns the machine-readable code from the response body, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.api_failure().and_then(|failure| failure.code.as_deref())
    }

    /// Returns the parsed response body, if any.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.api_failure().and_then(|failure| failure.details.as_ref())
    }

    /// Returns true if the failure is plausibly transient.
    ///
    /// Advisory only: connection problems, timeouts, rate limiting and
    /// server errors. The client never acts on this itself.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Timeout(_) | Self::RateLimit(_) | Self::Server(_)
        )
    }
}
