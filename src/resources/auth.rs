//! Passwordless sign-in flows: SMS one-time passwords and email magic links.
//!
//! Both flows follow the same shape. `register` starts a sign-in for a
//! phone number or email address within a group, the API delivers a
//! code or link by webhook, and the code or token is then submitted back
//! to complete the sign-in.

use serde_json::{Map, Value};

use super::Resource;
use crate::client::Client;
use crate::error::Result;
use crate::transport::HttpClient;

const SMS_TYPE: &str = "sms_auths";
const EMAIL_TYPE: &str = "email_auths";

/// Handle for `/sms_auths`, borrowed from a [`Client`].
pub struct SmsAuth<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> SmsAuth<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> SmsAuth<'_, H> {
    /// Starts an SMS sign-in for `phone_number` in `group_id`.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn register(&self, phone_number: &str, group_id: &str) -> Result<Value> {
        let document = Resource::new(SMS_TYPE)
            .attribute("phone_number", phone_number)
            .to_one("group", "groups", group_id)
            .into_document();
        self.client.post(SMS_TYPE, document).await
    }

    /// Submits the code the user received. `user_params` fills in profile
    /// attributes when the sign-in registers a new user.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn verify_otp(
        &self,
        id: &str,
        otp: &str,
        user_params: Map<String, Value>,
    ) -> Result<Value> {
        let document = Resource::existing(SMS_TYPE, id)
            .attribute("otp", otp)
            .attribute("user_params", user_params)
            .into_document();
        self.client.patch(&format!("{SMS_TYPE}/{id}"), document).await
    }

    /// Sends a fresh code.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn resend_otp(&self, id: &str) -> Result<Value> {
        let document = Resource::existing(SMS_TYPE, id).into_document();
        self.client.patch(&format!("{SMS_TYPE}/{id}"), document).await
    }
}

/// Handle for `/email_auths`, borrowed from a [`Client`].
pub struct EmailAuth<'a, H> {
    client: &'a Client<H>,
}

impl<'a, H> EmailAuth<'a, H> {
    pub(crate) const fn new(client: &'a Client<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> EmailAuth<'_, H> {
    /// Starts an email sign-in for `email` in `group_id`.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn register(&self, email: &str, group_id: &str) -> Result<Value> {
        let document = Resource::new(EMAIL_TYPE)
            .attribute("email", email)
            .to_one("group", "groups", group_id)
            .into_document();
        self.client.post(EMAIL_TYPE, document).await
    }

    /// Submits the token from the magic link.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn verify_token(
        &self,
        id: &str,
        token: &str,
        user_params: Map<String, Value>,
    ) -> Result<Value> {
        let document = Resource::existing(EMAIL_TYPE, id)
            .attribute("token", token)
            .attribute("user_params", user_params)
            .into_document();
        self.client.patch(&format!("{EMAIL_TYPE}/{id}"), document).await
    }

    /// Sends a fresh magic link.
    ///
    /// # Errors
    ///
    /// Propagates any [`Client::dispatch`] error.
    pub async fn resend_magic_link(&self, id: &str) -> Result<Value> {
        let document = Resource::existing(EMAIL_TYPE, id).into_document();
        self.client.patch(&format!("{EMAIL_TYPE}/{id}"), document).await
    }
}
