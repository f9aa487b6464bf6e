//! Typed webhook events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Kind of webhook delivery, as sent in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// A one-time password to deliver by SMS
    Otp,
    /// A sign-in link to deliver by email
    MagicLink,
}

impl WebhookEventType {
    /// Returns the wire name of the event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Otp => "otp",
            Self::MagicLink => "magic_link",
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookEventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "otp" => Ok(Self::Otp),
            "magic_link" => Ok(Self::MagicLink),
            other => Err(Error::InvalidWebhook(format!(
                "Unknown webhook event type: {other}"
            ))),
        }
    }
}

/// One-time password delivery.
///
/// `recipient` and `timestamp` are kept exactly as the sender wrote them;
/// only their presence is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpEvent {
    /// Phone number the code is for
    pub recipient: Value,
    /// Six-digit code
    pub code: String,
    /// When the event was emitted (Unix seconds or a timestamp string)
    pub timestamp: Value,
    /// Seconds the code stays valid
    #[serde(alias = "validitySeconds")]
    pub validity_seconds: i64,
}

/// Magic link delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicLinkEvent {
    /// Email address the link is for
    pub recipient: Value,
    /// Sign-in URL
    pub link: String,
    pub timestamp: Value,
    /// Seconds the link stays valid
    #[serde(alias = "validitySeconds")]
    pub validity_seconds: i64,
}

/// A verified and validated webhook.
///
/// Serializes with a `type` tag of `otp` or `magic_link`, matching the
/// inbound wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WebhookPayload {
    Otp(OtpEvent),
    MagicLink(MagicLinkEvent),
}

impl WebhookPayload {
    #[must_use]
    pub const fn event_type(&self) -> WebhookEventType {
        match self {
            Self::Otp(_) => WebhookEventType::Otp,
            Self::MagicLink(_) => WebhookEventType::MagicLink,
        }
    }

    #[must_use]
    pub const fn recipient(&self) -> &Value {
        match self {
            Self::Otp(event) => &event.recipient,
            Self::MagicLink(event) => &event.recipient,
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> &Value {
        match self {
            Self::Otp(event) => &event.timestamp,
            Self::MagicLink(event) => &event.timestamp,
        }
    }

    #[must_use]
    pub const fn validity_seconds(&self) -> i64 {
        match self {
            Self::Otp(event) => event.validity_seconds,
            Self::MagicLink(event) => event.validity_seconds,
        }
    }
}

impl From<OtpEvent> for WebhookPayload {
    fn from(event: OtpEvent) -> Self {
        Self::Otp(event)
    }
}

impl From<MagicLinkEvent> for WebhookPayload {
    fn from(event: MagicLinkEvent) -> Self {
        Self::MagicLink(event)
    }
}
