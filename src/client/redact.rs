//! Redaction of sensitive values before they reach the log.

use serde_json::{Map, Value};

/// Replacement text for redacted values.
pub const REDACTED: &str = "[REDACTED]";

/// Key fragments that mark a field as sensitive (case-insensitive).
const SENSITIVE_FRAGMENTS: [&str; 7] = [
    "password",
    "secret",
    "token",
    "api_key",
    "auth",
    "authorization",
    "credential",
];

/// Header values longer than this are never logged.
const MAX_HEADER_VALUE_LEN: usize = 20;

/// Returns true if a field with this name must not be logged.
#[must_use]
pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_FRAGMENTS
        .iter()
        .any(|fragment| key.contains(fragment))
}

/// Returns a copy of `value` with every sensitive field replaced, at any depth.
#[must_use]
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, nested)| {
                    let nested = if is_sensitive_key(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact(nested)
                    };
                    (key.clone(), nested)
                })
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

/// Returns the header value, or [`REDACTED`] if it is long enough to be a credential.
#[must_use]
pub fn redact_header_value(value: &str) -> &str {
    if value.len() > MAX_HEADER_VALUE_LEN {
        REDACTED
    } else {
        value
    }
}
