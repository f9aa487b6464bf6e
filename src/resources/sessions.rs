//! Sessions, audit logs and the realm.

use serde_json::Value;

use super::{QueryOptions, Resource};
use crate::client::{Client, Method, Request};
use crate::error::Result;
use crate::transport::HttpClient;

const SESSIONS: &str = "sessions";
const AUDIT_LOGS: &str = "audit_logs";
const REALM: &str = "realm";

/// Handle for `/sessions`, borrowed from a [`Client`].
pub struct Sessions<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> Sessions<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> Sessions<'_, H> {
    /// Lists sessions.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn list(&self, options: QueryOptions) -> Result<Value> {
        self.client
            .dispatch(Request::new(Method::Get, SESSIONS).with_params(options.into_params(SESSIONS)))
            .await
    }

    /// Fetches one session.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn retrieve(&self, id: &str, options: QueryOptions) -> Result<Value> {
        self.client
            .dispatch(
                Request::new(Method::Get, format!("{SESSIONS}/{id}"))
                    .with_params(options.into_params(SESSIONS)),
            )
            .await
    }

    /// Ends a session.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn revoke(&self, id: &str) -> Result<Value> {
        let document = Resource::existing(SESSIONS, id)
            .attribute("active", false)
            .into_document();
        self.client.patch(&format!("{SESSIONS}/{id}"), document).await
    }

    /// Marks a session as active now.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn update_activity(&self, id: &str) -> Result<Value> {
        let document = Resource::existing(SESSIONS, id).into_document();
        self.client.patch(&format!("{SESSIONS}/{id}"), document).await
    }
}

/// Handle for `/audit_logs`, borrowed from a [`Client`].
pub struct AuditLogs<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> AuditLogs<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> AuditLogs<'_, H> {
    /// Lists audit log entries.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn list(&self, options: QueryOptions) -> Result<Value> {
        self.client
            .dispatch(
                Request::new(Method::Get, AUDIT_LOGS).with_params(options.into_params(AUDIT_LOGS)),
            )
            .await
    }

    /// Fetches one audit log entry.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn retrieve(&self, id: &str, options: QueryOptions) -> Result<Value> {
        self.client
            .dispatch(
                Request::new(Method::Get, format!("{AUDIT_LOGS}/{id}"))
                    .with_params(options.into_params(AUDIT_LOGS)),
            )
            .await
    }
}

/// Handle for `/realm`, borrowed from a [`Client`].
pub struct Realm<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> Realm<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> Realm<'_, H> {
    /// Fetches the realm the API key belongs to.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn get(&self) -> Result<Value> {
        self.client.get(REALM, Value::Null).await
    }
}
