//! Request/response log events.
//!
//! Events are only emitted when the client config enables logging at the
//! matching level, so an embedding application's subscriber never sees
//! traffic it did not ask for.

use std::time::Duration;

use serde_json::Value;

use crate::config::{ClientConfig, LogLevel};
use crate::error::Error;
use crate::transport::HttpResponse;

use super::Request;
use super::query;
use super::redact::{redact, redact_header_value};

pub fn request(config: &ClientConfig, request: &Request) {
    if !config.logs_at(LogLevel::Info) {
        return;
    }

    tracing::info!(
        method = %request.method,
        path = %request.path,
        params = query::flatten(&request.params).len(),
        "API request"
    );

    if config.logs_at(LogLevel::Debug) {
        let params = redact(&Value::Object(request.params.clone())).to_string();
        let body = request.body.as_ref().map(redact).map(|b| b.to_string());
        let headers: Vec<String> = request
            .headers
            .iter()
            .map(|(name, value)| format!("{name}: {}", redact_header_value(value)))
            .collect();
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            params = %params,
            body = body.as_deref().unwrap_or(""),
            headers = ?headers,
            "API request details"
        );
    }
}

pub fn response(config: &ClientConfig, request: &Request, response: &HttpResponse, elapsed: Duration) {
    let status = response.status.as_u16();
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    let level = level_for_status(status);

    if !config.logs_at(level) {
        return;
    }

    let method = request.method.as_str();
    let path = request.path.as_str();
    match level {
        LogLevel::Error => tracing::error!(method, path, status, duration_ms, "API response"),
        LogLevel::Warn => tracing::warn!(method, path, status, duration_ms, "API response"),
        LogLevel::Info | LogLevel::Debug => {
            tracing::info!(method, path, status, duration_ms, "API response");
        }
    }

    if config.logs_at(LogLevel::Debug) {
        let body = serde_json::from_slice::<Value>(&response.body)
            .map(|parsed| redact(&parsed).to_string())
            .unwrap_or_else(|_| format!("<{} bytes>", response.body.len()));
        tracing::debug!(method, path, status, body = %body, "API response body");
    }
}

pub fn failure(config: &ClientConfig, request: &Request, error: &Error, elapsed: Duration) {
    if !config.logs_at(LogLevel::Error) {
        return;
    }

    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    tracing::error!(
        method = request.method.as_str(),
        path = request.path.as_str(),
        kind = %error.kind(),
        duration_ms,
        error = %error,
        "API error"
    );
}

/// Level of the response event for a status code.
#[must_use]
pub const fn level_for_status(status: u16) -> LogLevel {
    match status {
        300..=499 => LogLevel::Warn,
        500..=599 => LogLevel::Error,
        _ => LogLevel::Info,
    }
}
