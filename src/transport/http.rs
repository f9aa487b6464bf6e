//! Wire-level request/response values and the [`HttpClient`] seam.

use super::HttpError;

/// A fully resolved call handed to an [`HttpClient`].
///
/// The dispatcher has already joined the path, encoded the query and
/// serialized the JSON:API document by the time one of these exists.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: http::Method,
    /// Absolute URL including the query string
    pub url: url::Url,
    pub headers: http::HeaderMap,
    /// Serialized JSON body, if any
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Starts a call with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Uses `headers` as the complete header set.
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Whatever the server answered, status and buffered body.
///
/// Error statuses are still responses here; classification happens in
/// [`crate::client::interpret`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: http::StatusCode,
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// True when the body has no content besides ASCII whitespace.
    ///
    /// The API answers 204 with an empty body and some proxies add a
    /// trailing newline; both count as "no document".
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }
}

/// Sends one [`HttpRequest`] and hands back the raw [`HttpResponse`].
///
/// [`ReqwestClient`](super::ReqwestClient) is the production implementation;
/// tests substitute in-memory clients.
///
/// # Example
///
/// ```
/// use xkepster::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Unreachable;
///
/// impl HttpClient for Unreachable {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Err(HttpError::Timeout)
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Performs the call. Any received status is `Ok`.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Connection`] if no connection could be made
    /// - [`HttpError::Timeout`] if the connect or read timeout elapsed
    /// - [`HttpError::InvalidRequest`] if the request could not be built
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
