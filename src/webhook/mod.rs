//! Verification of inbound webhooks.
//!
//! The Kepster API delivers one-time passwords and magic links to the
//! host application by webhook. Each delivery is signed with HMAC-SHA256
//! over the raw body using the shared webhook secret.
//!
//! - [`WebhookVerifier`] checks the signature and validates the payload
//! - [`WebhookPayload`] is the typed result ([`OtpEvent`] or [`MagicLinkEvent`])
//! - [`SignatureFailure`] tells which precondition of the signature check failed

mod event;
mod signature;
mod verifier;

#[cfg(test)]
mod event_tests;

pub use event::{MagicLinkEvent, OtpEvent, WebhookEventType, WebhookPayload};
pub use signature::SignatureFailure;
pub use verifier::WebhookVerifier;

/// Header carrying the hex signature of the body.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Header carrying the event type.
pub const EVENT_HEADER: &str = "X-Webhook-Event";
