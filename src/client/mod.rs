//! Request dispatcher for the Kepster API.
//!
//! [`Client`] turns a [`Request`] into exactly one HTTP call:
//! it checks credentials, assembles headers, resolves the URL, times the
//! call and maps the outcome onto [`Error`]. It never retries.

mod log;
pub mod query;
pub mod redact;
mod request;
mod response;

#[cfg(test)]
mod dispatch_tests;
#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
mod query_tests;

pub use request::{Method, Request};
pub use response::interpret;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiFailure, Error, Result};
use crate::resources::{
    AuditLogs, EmailAuth, Groups, OperationTokens, Realm, Sessions, SmsAuth, Tokens, Users,
};
use crate::transport::{HttpClient, HttpError, HttpRequest, ReqwestClient};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-kepster-key";

/// Header carrying the optional machine token.
pub const MACHINE_TOKEN_HEADER: &str = "x-machine-token";

/// Media type for both request and response bodies.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

const MISSING_API_KEY: &str =
    "API key is missing. Set XKEPSTER_API_KEY or configure ClientConfig::api_key";

/// Builds a transport from the client configuration.
pub type Connector<H> = fn(&ClientConfig) -> std::result::Result<H, HttpError>;

/// Client for the Kepster API.
///
/// The configuration is frozen at construction. The transport is built
/// lazily on first use and shared by all later calls; concurrent first
/// calls build it only once.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
///
/// # Example
///
/// ```no_run
/// use serde_json::json;
/// use xkepster::Client;
/// use xkepster::config::ClientConfig;
///
/// # async fn example() -> Result<(), xkepster::Error> {
/// let client = Client::new(ClientConfig::default().with_api_key("xk_live_123"));
/// let users = client.get("users", json!({"page": {"size": 10}})).await?;
/// println!("{users}");
/// # Ok(())
/// # }
/// ```
pub struct Client<H = ReqwestClient> {
    config: Arc<ClientConfig>,
    transport: OnceCell<H>,
    connect: Connector<H>,
}

impl Client<ReqwestClient> {
    /// Creates a client that talks HTTP through reqwest.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_connector(config, ReqwestClient::from_config)
    }
}

impl<H> Client<H> {
    /// Creates a client whose transport is built by `connect` on first use.
    #[must_use]
    pub fn with_connector(config: ClientConfig, connect: Connector<H>) -> Self {
        Self {
            config: Arc::new(config),
            transport: OnceCell::new(),
            connect,
        }
    }

    /// Creates a client around an already-built transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: H) -> Self {
        Self {
            config: Arc::new(config),
            transport: OnceCell::new_with(Some(transport)),
            connect: |_: &ClientConfig| {
                Err(HttpError::InvalidRequest(
                    "transport was supplied at construction".to_string(),
                ))
            },
        }
    }

    /// Returns the client's configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns true once the transport has been built.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.transport.initialized()
    }

    /// User management.
    #[must_use]
    pub const fn users(&self) -> Users<'_, H> {
        Users::new(self)
    }

    /// Group management.
    #[must_use]
    pub const fn groups(&self) -> Groups<'_, H> {
        Groups::new(self)
    }

    /// Phone number sign-in with one-time passwords.
    #[must_use]
    pub const fn sms_auth(&self) -> SmsAuth<'_, H> {
        SmsAuth::new(self)
    }

    /// Email sign-in with magic links.
    #[must_use]
    pub const fn email_auth(&self) -> EmailAuth<'_, H> {
        EmailAuth::new(self)
    }

    /// Session management.
    #[must_use]
    pub const fn sessions(&self) -> Sessions<'_, H> {
        Sessions::new(self)
    }

    /// Access token management.
    #[must_use]
    pub const fn tokens(&self) -> Tokens<'_, H> {
        Tokens::new(self)
    }

    /// Single-purpose operation tokens.
    #[must_use]
    pub const fn operation_tokens(&self) -> OperationTokens<'_, H> {
        OperationTokens::new(self)
    }

    /// Audit log access.
    #[must_use]
    pub const fn audit_logs(&self) -> AuditLogs<'_, H> {
        AuditLogs::new(self)
    }

    /// Realm information.
    #[must_use]
    pub const fn realm(&self) -> Realm<'_, H> {
        Realm::new(self)
    }
}

impl<H> fmt::Debug for Client<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("connected", &self.transport.initialized())
            .finish_non_exhaustive()
    }
}

impl<H: HttpClient> Client<H> {
    /// Sends a GET request.
    ///
    /// `params` is a JSON object, or `null` for no query string. The
    /// convenience methods send only the default headers; build a
    /// [`Request`] with [`Request::with_header`] and pass it to
    /// [`Client::dispatch`] to add more.
    ///
    /// # Errors
    ///
    /// [`Error::Connection`] if `params` is neither an object nor `null`
    /// (nothing is sent), otherwise see [`Client::dispatch`].
    pub async fn get(&self, path: &str, params: Value) -> Result<Value> {
        let params = into_params(params)?;
        self.dispatch(Request::new(Method::Get, path).with_params(params))
            .await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::dispatch`].
    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.dispatch(Request::new(Method::Post, path).with_body(body))
            .await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::dispatch`].
    pub async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.dispatch(Request::new(Method::Patch, path).with_body(body))
            .await
    }

    /// Sends a DELETE request. `params` is handled as in [`Client::get`].
    ///
    /// # Errors
    ///
    /// As [`Client::get`].
    pub async fn delete(&self, path: &str, params: Value) -> Result<Value> {
        let params = into_params(params)?;
        self.dispatch(Request::new(Method::Delete, path).with_params(params))
            .await
    }

    /// Sends one request and interprets the response.
    ///
    /// # Errors
    ///
    /// - [`Error::Authentication`] without a status if no API key is set
    ///   (no request is sent)
    /// - [`Error::Timeout`] / [`Error::Connection`] for transport failures
    /// - [`Error::ResponseParsing`] if a success body is not JSON
    /// - a status-specific variant for any other status (see [`interpret`])
    pub async fn dispatch(&self, request: Request) -> Result<Value> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| Error::Authentication(ApiFailure::local(MISSING_API_KEY)))?;

        let url = self.resolve_url(&request)?;
        let headers = self.build_headers(api_key, &request.headers)?;

        let mut http_request = HttpRequest::new(request.method.as_http(), url).with_headers(headers);
        if let Some(ref body) = request.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| Error::Connection(format!("Failed to serialize request body: {e}")))?;
            http_request = http_request.with_body(bytes);
        }

        log::request(&self.config, &request);

        let transport = self.transport().await?;

        let started = Instant::now();
        let outcome = transport.request(http_request).await;
        let elapsed = started.elapsed();

        match outcome {
            Ok(response) => {
                log::response(&self.config, &request, &response, elapsed);
                interpret(&response).inspect_err(|error| {
                    if matches!(error, Error::ResponseParsing(_)) {
                        log::failure(&self.config, &request, error, elapsed);
                    }
                })
            }
            Err(e) => {
                let error = classify(e);
                log::failure(&self.config, &request, &error, elapsed);
                Err(error)
            }
        }
    }

    async fn transport(&self) -> Result<&H> {
        self.transport
            .get_or_try_init(|| async {
                tracing::debug!(base_url = %self.config.base_url, "Building HTTP transport");
                (self.connect)(&self.config)
            })
            .await
            .map_err(classify)
    }

    /// Resolves `request.path` under the base URL and attaches the query.
    ///
    /// A leading `/` is ignored so paths always stay under the base path.
    fn resolve_url(&self, request: &Request) -> Result<Url> {
        let mut base = self.config.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut url = base
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| Error::Connection(format!("Invalid request path '{}': {e}", request.path)))?;

        if url.origin() != base.origin() {
            return Err(Error::Connection(format!(
                "Request path '{}' leaves the configured base URL",
                request.path
            )));
        }

        query::append(&mut url, &request.params);
        Ok(url)
    }

    fn build_headers(&self, api_key: &str, extra: &[(String, String)]) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), header_value(API_KEY_HEADER, api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(USER_AGENT, header_value("user-agent", &self.config.user_agent)?);

        if let Some(ref token) = self.config.machine_token {
            headers.insert(
                HeaderName::from_static(MACHINE_TOKEN_HEADER),
                header_value(MACHINE_TOKEN_HEADER, token)?,
            );
        }

        // Caller headers win on collision
        for (name, value) in extra {
            let header_name = name
                .parse::<HeaderName>()
                .map_err(|e| Error::Connection(format!("Invalid header name '{name}': {e}")))?;
            headers.insert(header_name, header_value(name, value)?);
        }

        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::Connection(format!("Invalid value for header '{name}': {e}")))
}

/// Converts a transport failure into the crate taxonomy.
fn classify(error: HttpError) -> Error {
    match error {
        HttpError::Timeout => Error::Timeout("Request timed out".to_string()),
        HttpError::Connection(source) => Error::Connection(source.to_string()),
        HttpError::InvalidRequest(reason) => Error::Connection(reason),
    }
}

fn into_params(params: Value) -> Result<Map<String, Value>> {
    match params {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::Connection(format!(
            "Query params must be a JSON object, got {other}"
        ))),
    }
}
