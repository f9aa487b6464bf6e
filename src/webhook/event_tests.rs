//! Tests for webhook event types.

use super::{MagicLinkEvent, OtpEvent, WebhookEventType, WebhookPayload};
use crate::error::Error;
use serde_json::json;

fn otp() -> OtpEvent {
    OtpEvent {
        recipient: json!("+15550100"),
        code: "123456".to_string(),
        timestamp: json!(1_700_000_000),
        validity_seconds: 300,
    }
}

#[test]
fn event_type_parses_wire_names() {
    assert_eq!("otp".parse::<WebhookEventType>().unwrap(), WebhookEventType::Otp);
    assert_eq!(
        "magic_link".parse::<WebhookEventType>().unwrap(),
        WebhookEventType::MagicLink
    );
}

#[test]
fn unknown_event_type_is_invalid_webhook() {
    let err = "sms".parse::<WebhookEventType>().unwrap_err();

    assert!(matches!(err, Error::InvalidWebhook(_)));
    assert_eq!(err.message(), "Unknown webhook event type: sms");
}

#[test]
fn payload_serializes_with_type_tag() {
    let value = serde_json::to_value(WebhookPayload::from(otp())).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "otp",
            "recipient": "+15550100",
            "code": "123456",
            "timestamp": 1_700_000_000,
            "validity_seconds": 300
        })
    );
}

#[test]
fn payload_deserializes_camel_case_validity() {
    let payload: WebhookPayload = serde_json::from_value(json!({
        "type": "magic_link",
        "recipient": "a@example.com",
        "link": "https://auth.example.com/m/abc",
        "timestamp": 1_700_000_000,
        "validitySeconds": 900
    }))
    .unwrap();

    assert_eq!(
        payload,
        WebhookPayload::MagicLink(MagicLinkEvent {
            recipient: json!("a@example.com"),
            link: "https://auth.example.com/m/abc".to_string(),
            timestamp: json!(1_700_000_000),
            validity_seconds: 900,
        })
    );
}

#[test]
fn accessors_read_through_variants() {
    let payload = WebhookPayload::from(otp());

    assert_eq!(payload.event_type(), WebhookEventType::Otp);
    assert_eq!(payload.recipient(), &json!("+15550100"));
    assert_eq!(payload.timestamp(), &json!(1_700_000_000));
    assert_eq!(payload.validity_seconds(), 300);
}

#[test]
fn timestamp_and_recipient_keep_their_wire_form() {
    let payload: WebhookPayload = serde_json::from_value(json!({
        "type": "otp",
        "recipient": 15_550_100,
        "code": "123456",
        "timestamp": "2024-01-01T00:00:00Z",
        "validity_seconds": 300
    }))
    .unwrap();

    assert_eq!(payload.recipient(), &json!(15_550_100));
    assert_eq!(payload.timestamp(), &json!("2024-01-01T00:00:00Z"));
}
