//! Group management.

use serde_json::Value;

use super::{Fields, QueryOptions, Resource};
use crate::client::{Client, Method, Request};
use crate::error::Result;
use crate::transport::HttpClient;

const TYPE: &str = "groups";

/// Fieldset requested when the caller does not choose one.
pub const DEFAULT_FIELDS: [&str; 4] = ["name", "description", "auth_strategy", "allow_registration"];

/// Attributes of a group to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub name: String,
    pub description: String,
    /// How members sign in, e.g. `sms` or `email`
    pub auth_strategy: String,
    /// Whether unknown users may register into the group
    pub allow_registration: bool,
}

/// Changes to an existing group. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub auth_strategy: Option<String>,
    pub allow_registration: Option<bool>,
}

/// Handle for `/groups`, borrowed from a [`Client`].
pub struct Groups<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> Groups<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> Groups<'_, H> {
    /// Lists groups. Without a fieldset, [`DEFAULT_FIELDS`] are requested;
    /// pass [`Fields::Omit`] to send none.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn list(&self, options: QueryOptions) -> Result<Value> {
        self.client
            .dispatch(Request::new(Method::Get, TYPE).with_params(params(options)))
            .await
    }

    /// Creates a group.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn create(&self, group: NewGroup) -> Result<Value> {
        let document = Resource::new(TYPE)
            .attribute("name", group.name)
            .attribute("description", group.description)
            .attribute("auth_strategy", group.auth_strategy)
            .attribute("allow_registration", group.allow_registration)
            .into_document();
        self.client.post(TYPE, document).await
    }

    /// Fetches one group, with the same fieldset defaulting as [`Groups::list`].
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn retrieve(&self, id: &str, options: QueryOptions) -> Result<Value> {
        self.client
            .dispatch(Request::new(Method::Get, format!("{TYPE}/{id}")).with_params(params(options)))
            .await
    }

    /// Updates a group.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn update(&self, id: &str, changes: GroupUpdate) -> Result<Value> {
        let document = Resource::existing(TYPE, id)
            .optional_attribute("name", changes.name)
            .optional_attribute("description", changes.description)
            .optional_attribute("auth_strategy", changes.auth_strategy)
            .optional_attribute("allow_registration", changes.allow_registration)
            .into_document();
        self.client.patch(&format!("{TYPE}/{id}"), document).await
    }

    /// Deletes a group.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.delete(&format!("{TYPE}/{id}"), Value::Null).await
    }
}

fn params(mut options: QueryOptions) -> serde_json::Map<String, Value> {
    if options.fields.is_none() {
        options.fields = Some(Fields::from(DEFAULT_FIELDS));
    }
    options.into_params(TYPE)
}
