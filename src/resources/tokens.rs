//! Access tokens and single-purpose operation tokens.

use serde_json::{Map, Value};

use super::{QueryOptions, Resource};
use crate::client::{Client, Method, Request};
use crate::error::Result;
use crate::transport::HttpClient;

const TOKENS: &str = "tokens";
const OPERATION_TOKENS: &str = "operation_tokens";

/// Handle for `/tokens`, borrowed from a [`Client`].
pub struct Tokens<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> Tokens<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> Tokens<'_, H> {
    /// Lists tokens.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn list(&self, options: QueryOptions) -> Result<Value> {
        self.client
            .dispatch(Request::new(Method::Get, TOKENS).with_params(options.into_params(TOKENS)))
            .await
    }

    /// Issues a replacement for a token.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn rotate(&self, id: &str) -> Result<Value> {
        let document = Resource::existing(TOKENS, id).into_document();
        self.client.patch(&format!("{TOKENS}/{id}"), document).await
    }

    /// Revokes a token.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn revoke(&self, id: &str) -> Result<Value> {
        let document = Resource::existing(TOKENS, id)
            .attribute("revoked", true)
            .into_document();
        self.client.patch(&format!("{TOKENS}/{id}"), document).await
    }
}

/// An operation token to issue for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOperationToken {
    /// What the token authorizes, e.g. `password_reset`
    pub purpose: String,
    /// Expiry as an ISO 8601 timestamp
    pub expires_at: String,
    pub user_id: String,
    pub metadata: Map<String, Value>,
}

impl NewOperationToken {
    #[must_use]
    pub fn new(
        purpose: impl Into<String>,
        expires_at: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            purpose: purpose.into(),
            expires_at: expires_at.into(),
            user_id: user_id.into(),
            metadata: Map::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Handle for `/operation_tokens`, borrowed from a [`Client`].
pub struct OperationTokens<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> OperationTokens<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> OperationTokens<'_, H> {
    /// Lists operation tokens.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn list(&self, options: QueryOptions) -> Result<Value> {
        self.client
            .dispatch(
                Request::new(Method::Get, OPERATION_TOKENS)
                    .with_params(options.into_params(OPERATION_TOKENS)),
            )
            .await
    }

    /// Issues an operation token.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn create(&self, token: NewOperationToken) -> Result<Value> {
        let document = Resource::new(OPERATION_TOKENS)
            .attribute("purpose", token.purpose)
            .attribute("expires_at", token.expires_at)
            .attribute("metadata", token.metadata)
            .to_one("user", "users", token.user_id)
            .into_document();
        self.client.post(OPERATION_TOKENS, document).await
    }

    /// Checks a token for `purpose` and consumes it; a token can be used once.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn verify_and_consume(&self, id: &str, token: &str, purpose: &str) -> Result<Value> {
        let document = Resource::existing(OPERATION_TOKENS, id)
            .attribute("token", token)
            .attribute("purpose", purpose)
            .into_document();
        self.client
            .patch(&format!("{OPERATION_TOKENS}/{id}"), document)
            .await
    }
}
