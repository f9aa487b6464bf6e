//! Outbound request description.

use std::fmt;

use serde_json::{Map, Value};

/// HTTP methods the Kepster API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read a resource or collection
    Get,
    /// Create a resource
    Post,
    /// Update a resource
    Patch,
    /// Delete a resource
    Delete,
}

impl Method {
    /// Returns the equivalent `http` crate method.
    #[must_use]
    pub fn as_http(self) -> http::Method {
        match self {
            Self::Get => http::Method::GET,
            Self::Post => http::Method::POST,
            Self::Patch => http::Method::PATCH,
            Self::Delete => http::Method::DELETE,
        }
    }

    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single API call, before headers and credentials are attached.
///
/// Built per call and consumed by [`Client::dispatch`](super::Client::dispatch).
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xkepster::client::{Method, Request};
///
/// let request = Request::new(Method::Get, "users")
///     .with_param("page", json!({"number": 2}))
///     .with_header("X-Request-Id", "abc");
///
/// assert_eq!(request.path, "users");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Path relative to the configured base URL
    pub path: String,
    /// JSON body, serialized as-is
    pub body: Option<Value>,
    /// Query parameters; nested objects use bracket notation on the wire
    pub params: Map<String, Value>,
    /// Extra headers; these win over the client's defaults
    pub headers: Vec<(String, String)>,
}

impl Request {
    /// Creates a request with no body, params or extra headers.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            params: Map::new(),
            headers: Vec::new(),
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = params;
        self
    }

    /// Adds one query parameter, replacing an existing one with the same key.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Adds an extra header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
