//! Signature verification and payload validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::event::{MagicLinkEvent, OtpEvent, WebhookEventType, WebhookPayload};
use super::signature::{self, SignatureFailure};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

static OTP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("OTP code pattern is valid"));

const VALIDITY_SECONDS: &str = "validity_seconds";
const VALIDITY_SECONDS_CAMEL: &str = "validitySeconds";

/// Verifies webhook signatures and turns verified bodies into typed events.
///
/// Holds only the shared secret; every call is independent.
///
/// # Example
///
/// ```
/// use xkepster::webhook::WebhookVerifier;
///
/// let verifier = WebhookVerifier::new(Some("whsec_test".to_string()));
/// let body = br#"{"type":"otp","recipient":"+15550100","code":"123456","timestamp":1700000000,"validity_seconds":300}"#;
/// let signature = verifier.sign(body).unwrap();
///
/// let event = verifier.parse_otp_webhook(&signature, body).unwrap();
/// assert_eq!(event.code, "123456");
/// ```
#[derive(Clone, Default)]
pub struct WebhookVerifier {
    secret: Option<String>,
}

impl WebhookVerifier {
    /// Creates a verifier. An empty secret counts as no secret.
    #[must_use]
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// Creates a verifier using the client's webhook secret.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.webhook_secret.clone())
    }

    /// Returns true if a secret is configured.
    #[must_use]
    pub const fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Computes the signature a sender would attach to `body`.
    ///
    /// Returns `None` if no secret is configured.
    #[must_use]
    pub fn sign(&self, body: &[u8]) -> Option<String> {
        signature::compute(self.secret.as_deref()?, body)
    }

    /// Checks `signature` against `body`, reporting which precondition failed.
    ///
    /// # Errors
    ///
    /// Returns the [`SignatureFailure`] describing the first failed check.
    pub fn check_signature(&self, signature: &str, body: &[u8]) -> Result<(), SignatureFailure> {
        let secret = self
            .secret
            .as_deref()
            .ok_or(SignatureFailure::MissingSecret)?;
        if signature.is_empty() {
            return Err(SignatureFailure::MissingSignature);
        }
        if body.is_empty() {
            return Err(SignatureFailure::MissingBody);
        }

        let expected = signature::compute(secret, body).ok_or(SignatureFailure::MissingSecret)?;
        if signature::constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
            Ok(())
        } else {
            Err(SignatureFailure::mismatch(signature))
        }
    }

    /// Returns true only if the secret, signature and body are all present
    /// and the signature matches.
    #[must_use]
    pub fn verify_signature(&self, signature: &str, body: &[u8]) -> bool {
        self.check_signature(signature, body).is_ok()
    }

    /// Verifies the signature, then parses and validates the body.
    ///
    /// # Errors
    ///
    /// - [`Error::WebhookVerification`] if the signature check fails
    /// - [`Error::InvalidWebhook`] if the body is not valid JSON, is missing
    ///   fields, has malformed fields, or is not of `expected` type
    pub fn verify_and_parse(
        &self,
        signature: &str,
        body: &[u8],
        expected: Option<WebhookEventType>,
    ) -> Result<WebhookPayload> {
        self.check_signature(signature, body).map_err(|failure| {
            Error::WebhookVerification(format!("Invalid webhook signature: {failure}"))
        })?;

        let payload: Value = serde_json::from_slice(body)
            .map_err(|e| Error::InvalidWebhook(format!("Invalid JSON payload: {e}")))?;

        validate(&payload, expected)
    }

    /// Verifies and parses a one-time password delivery.
    ///
    /// # Errors
    ///
    /// As [`WebhookVerifier::verify_and_parse`], including when the event is
    /// not an OTP event.
    pub fn parse_otp_webhook(&self, signature: &str, body: &[u8]) -> Result<OtpEvent> {
        match self.verify_and_parse(signature, body, Some(WebhookEventType::Otp))? {
            WebhookPayload::Otp(event) => Ok(event),
            other => Err(unexpected_type(WebhookEventType::Otp, other.event_type())),
        }
    }

    /// Verifies and parses a magic link delivery.
    ///
    /// # Errors
    ///
    /// As [`WebhookVerifier::verify_and_parse`], including when the event is
    /// not a magic link event.
    pub fn parse_magic_link_webhook(&self, signature: &str, body: &[u8]) -> Result<MagicLinkEvent> {
        match self.verify_and_parse(signature, body, Some(WebhookEventType::MagicLink))? {
            WebhookPayload::MagicLink(event) => Ok(event),
            other => Err(unexpected_type(WebhookEventType::MagicLink, other.event_type())),
        }
    }
}

impl fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidWebhook(message.into())
}

fn unexpected_type(expected: WebhookEventType, actual: impl fmt::Display) -> Error {
    invalid(format!("Expected event type {expected}, got {actual}"))
}

fn validate(payload: &Value, expected: Option<WebhookEventType>) -> Result<WebhookPayload> {
    let Value::Object(fields) = payload else {
        return Err(invalid("Payload must be a JSON object"));
    };

    let missing = missing_fields(fields, &["type", "timestamp"]);
    if !missing.is_empty() {
        return Err(invalid(format!("Missing required fields: {}", missing.join(", "))));
    }

    let raw_type = &fields["type"];
    let type_name = raw_type
        .as_str()
        .map_or_else(|| raw_type.to_string(), ToString::to_string);

    if let Some(expected) = expected.filter(|e| type_name != e.as_str()) {
        return Err(unexpected_type(expected, type_name));
    }

    match type_name.parse::<WebhookEventType>()? {
        WebhookEventType::Otp => otp_event(fields).map(WebhookPayload::Otp),
        WebhookEventType::MagicLink => magic_link_event(fields).map(WebhookPayload::MagicLink),
    }
}

fn otp_event(fields: &Map<String, Value>) -> Result<OtpEvent> {
    let missing = missing_fields(fields, &["recipient", "code", VALIDITY_SECONDS]);
    if !missing.is_empty() {
        return Err(invalid(format!(
            "OTP webhook missing required fields: {}",
            missing.join(", ")
        )));
    }

    let code = fields["code"]
        .as_str()
        .filter(|code| OTP_CODE.is_match(code))
        .ok_or_else(|| invalid("Invalid OTP code format"))?;

    Ok(OtpEvent {
        validity_seconds: validity_seconds(fields)?,
        timestamp: fields["timestamp"].clone(),
        recipient: fields["recipient"].clone(),
        code: code.to_string(),
    })
}

fn magic_link_event(fields: &Map<String, Value>) -> Result<MagicLinkEvent> {
    let missing = missing_fields(fields, &["recipient", "link", VALIDITY_SECONDS]);
    if !missing.is_empty() {
        return Err(invalid(format!(
            "Magic link webhook missing required fields: {}",
            missing.join(", ")
        )));
    }

    let link = fields["link"]
        .as_str()
        .filter(|link| link.starts_with("http"))
        .ok_or_else(|| invalid("Invalid magic link URL format"))?;

    Ok(MagicLinkEvent {
        validity_seconds: validity_seconds(fields)?,
        timestamp: fields["timestamp"].clone(),
        recipient: fields["recipient"].clone(),
        link: link.to_string(),
    })
}

/// Returns the required keys absent from `fields`, in the given order.
fn missing_fields<'a>(fields: &Map<String, Value>, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|key| lookup(fields, key).is_none())
        .collect()
}

/// `validity_seconds` is also accepted in camelCase.
fn lookup<'v>(fields: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    fields.get(key).or_else(|| {
        if key == VALIDITY_SECONDS {
            fields.get(VALIDITY_SECONDS_CAMEL)
        } else {
            None
        }
    })
}

fn validity_seconds(fields: &Map<String, Value>) -> Result<i64> {
    lookup(fields, VALIDITY_SECONDS)
        .and_then(Value::as_i64)
        .ok_or_else(|| invalid(format!("{VALIDITY_SECONDS} must be an integer")))
}
