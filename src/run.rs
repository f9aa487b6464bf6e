//! Command execution.
//!
//! Turns a parsed subcommand into one API call or one webhook check and
//! prints the result as JSON on stdout.

use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use xkepster::client::{Method, Request};
use xkepster::config::{Command, ValidatedConfig};
use xkepster::webhook::{WebhookEventType, WebhookVerifier};
use xkepster::Client;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// A `--param` value was not `key=value`.
    #[error("Invalid parameter '{0}': expected 'key=value'")]
    InvalidParam(String),

    /// A `--header` value was not `Key=Value` or `Key: Value`.
    #[error("Invalid header '{0}': expected 'Key=Value' or 'Key: Value'")]
    InvalidHeader(String),

    /// The `--body` value was not JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The webhook body could not be read.
    #[error("Failed to read body from {origin}: {source}")]
    ReadBody {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// A webhook command was run without a secret.
    #[error("Webhook secret is not configured (use --webhook-secret or XKEPSTER_WEBHOOK_SECRET)")]
    MissingWebhookSecret,

    /// The API call or webhook verification failed.
    #[error(transparent)]
    Api(#[from] xkepster::Error),

    /// The result could not be written to stdout.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Executes one subcommand.
///
/// # Errors
///
/// Returns an error if the arguments are malformed, the call fails, or
/// the webhook is rejected.
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<(), RunError> {
    match command {
        // Handled before configuration is loaded
        Command::Init { .. } => Ok(()),

        Command::Request {
            method,
            path,
            body,
            params,
            headers,
        } => {
            let request = build_request(method.into(), path, body.as_deref(), &params, &headers)?;
            let client = Client::new(config.client);
            let response = client.dispatch(request).await?;
            print_json(&response).await
        }

        Command::VerifyWebhook {
            signature,
            body_file,
            event,
        } => {
            let verifier = verifier(&config)?;
            let body = read_body(body_file.as_deref()).await?;
            let payload = verify(&verifier, &signature, &body, event.map(Into::into))?;
            print_json(&payload).await
        }

        Command::SignWebhook { body_file } => {
            let verifier = verifier(&config)?;
            let body = read_body(body_file.as_deref()).await?;
            let signature = verifier.sign(&body).ok_or(RunError::MissingWebhookSecret)?;
            write_stdout(format!("{signature}\n").as_bytes()).await
        }
    }
}

/// Builds the request for the `request` subcommand.
fn build_request(
    method: Method,
    path: String,
    body: Option<&str>,
    params: &[String],
    headers: &[String],
) -> Result<Request, RunError> {
    let mut request = Request::new(method, path).with_params(parse_params(params)?);

    if let Some(body) = body {
        request = request.with_body(serde_json::from_str(body).map_err(RunError::InvalidBody)?);
    }

    for raw in headers {
        let (name, value) = parse_header(raw)?;
        request = request.with_header(name, value);
    }

    Ok(request)
}

/// Parses `key=value` pairs. Values that are valid JSON are used as JSON,
/// anything else is taken as a plain string.
fn parse_params(raw: &[String]) -> Result<Map<String, Value>, RunError> {
    let mut params = Map::new();
    for pair in raw {
        let (key, value) = pair
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| RunError::InvalidParam(pair.clone()))?;

        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        params.insert(key.trim().to_string(), value);
    }
    Ok(params)
}

/// Parses `Key=Value` or `Key: Value`, whichever separator comes first.
fn parse_header(raw: &str) -> Result<(String, String), RunError> {
    let split = match (raw.find('='), raw.find(':')) {
        (Some(eq), Some(colon)) => Some(eq.min(colon)),
        (Some(at), None) | (None, Some(at)) => Some(at),
        (None, None) => None,
    };

    let (name, value) = split
        .map(|at| (raw[..at].trim(), raw[at + 1..].trim()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| RunError::InvalidHeader(raw.to_string()))?;

    Ok((name.to_string(), value.to_string()))
}

fn verifier(config: &ValidatedConfig) -> Result<WebhookVerifier, RunError> {
    let verifier = WebhookVerifier::from_config(&config.client);
    if verifier.has_secret() {
        Ok(verifier)
    } else {
        Err(RunError::MissingWebhookSecret)
    }
}

fn verify(
    verifier: &WebhookVerifier,
    signature: &str,
    body: &[u8],
    expected: Option<WebhookEventType>,
) -> Result<xkepster::WebhookPayload, RunError> {
    match verifier.verify_and_parse(signature, body, expected) {
        Ok(payload) => {
            tracing::info!(event = %payload.event_type(), "Webhook verified");
            Ok(payload)
        }
        Err(e) => {
            tracing::warn!(kind = %e.kind(), "Webhook rejected");
            Err(e.into())
        }
    }
}

/// Reads the raw body from `path`, or from stdin when no path is given.
async fn read_body(path: Option<&Path>) -> Result<Vec<u8>, RunError> {
    match path {
        Some(path) => tokio::fs::read(path).await.map_err(|source| RunError::ReadBody {
            origin: path.display().to_string(),
            source,
        }),
        None => {
            let mut body = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut body)
                .await
                .map_err(|source| RunError::ReadBody {
                    origin: "stdin".to_string(),
                    source,
                })?;
            Ok(body)
        }
    }
}

async fn print_json<T: serde::Serialize>(value: &T) -> Result<(), RunError> {
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|e| RunError::Output(std::io::Error::other(e)))?;
    text.push('\n');
    write_stdout(text.as_bytes()).await
}

async fn write_stdout(bytes: &[u8]) -> Result<(), RunError> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(bytes).await.map_err(RunError::Output)?;
    stdout.flush().await.map_err(RunError::Output)
}
