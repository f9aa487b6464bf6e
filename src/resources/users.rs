//! User management.

use serde_json::{Map, Value};

use super::{QueryOptions, Resource};
use crate::client::{Client, Method, Request};
use crate::error::Result;
use crate::transport::HttpClient;

const TYPE: &str = "users";

/// Attributes of a user to create.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    /// Defaults to `user`
    pub role: String,
    pub custom_fields: Map<String, Value>,
    /// Groups the user joins on creation
    pub group_ids: Vec<String>,
}

impl NewUser {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: None,
            email: None,
            role: "user".to_string(),
            custom_fields: Map::new(),
            group_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    #[must_use]
    pub fn with_custom_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom_fields.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_ids.push(group_id.into());
        self
    }

    fn into_document(self) -> Value {
        let resource = Resource::new(TYPE)
            .attribute("first_name", self.first_name)
            .attribute("last_name", self.last_name)
            .optional_attribute("phone_number", self.phone_number)
            .optional_attribute("email", self.email)
            .attribute("role", self.role)
            .attribute("custom_fields", self.custom_fields);

        if self.group_ids.is_empty() {
            resource.into_document()
        } else {
            resource
                .to_many("groups", "groups", self.group_ids)
                .into_document()
        }
    }
}

/// Changes to an existing user. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub custom_fields: Option<Map<String, Value>>,
    /// Replaces the user's group memberships; an empty list removes all
    pub group_ids: Option<Vec<String>>,
}

impl UserUpdate {
    fn into_document(self, id: &str) -> Value {
        let resource = Resource::existing(TYPE, id)
            .optional_attribute("first_name", self.first_name)
            .optional_attribute("last_name", self.last_name)
            .optional_attribute("role", self.role)
            .optional_attribute("custom_fields", self.custom_fields);

        match self.group_ids {
            Some(ids) => resource.to_many("groups", "groups", ids).into_document(),
            None => resource.into_document(),
        }
    }
}

/// Handle for `/users`, borrowed from a [`Client`].
pub struct Users<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> Users<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> Users<'_, H> {
    /// Lists users.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn list(&self, options: QueryOptions) -> Result<Value> {
        self.client
            .dispatch(Request::new(Method::Get, TYPE).with_params(options.into_params(TYPE)))
            .await
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn create(&self, user: NewUser) -> Result<Value> {
        self.client.post(TYPE, user.into_document()).await
    }

    /// Fetches one user.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn retrieve(&self, id: &str, options: QueryOptions) -> Result<Value> {
        self.client
            .dispatch(
                Request::new(Method::Get, format!("{TYPE}/{id}"))
                    .with_params(options.into_params(TYPE)),
            )
            .await
    }

    /// Updates a user.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn update(&self, id: &str, changes: UserUpdate) -> Result<Value> {
        self.client
            .patch(&format!("{TYPE}/{id}"), changes.into_document(id))
            .await
    }

    /// Locks a user out, recording why.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn lock(&self, id: &str, reason: &str) -> Result<Value> {
        let document = Resource::existing(TYPE, id)
            .attribute("locked", true)
            .attribute("locked_reason", reason)
            .into_document();
        self.client.patch(&format!("{TYPE}/{id}"), document).await
    }

    /// Lifts a lock.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn unlock(&self, id: &str) -> Result<Value> {
        let document = Resource::existing(TYPE, id)
            .attribute("locked", false)
            .into_document();
        self.client.patch(&format!("{TYPE}/{id}"), document).await
    }

    /// Gives a user the `admin` role.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn promote_to_admin(&self, id: &str) -> Result<Value> {
        let document = Resource::existing(TYPE, id)
            .attribute("role", "admin")
            .into_document();
        self.client.patch(&format!("{TYPE}/{id}"), document).await
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.delete(&format!("{TYPE}/{id}"), Value::Null).await
    }
}
