//! Mapping of HTTP responses onto results.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::transport::HttpResponse;

/// Turns a received response into the parsed body or a typed error.
///
/// 200/201/202/204 succeed; an empty body yields `{}`. Every other status
/// is an error whose details are the parsed body when it is valid JSON.
///
/// # Errors
///
/// - [`Error::ResponseParsing`] if a success body is not valid JSON
/// - the status-specific variant from [`Error::from_status`] otherwise
pub fn interpret(response: &HttpResponse) -> Result<Value> {
    let status = response.status.as_u16();
    match status {
        200 | 201 | 202 | 204 => parse_success(response),
        _ => Err(Error::from_status(status, parse_lenient(response))),
    }
}

fn parse_success(response: &HttpResponse) -> Result<Value> {
    if response.is_blank() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    serde_json::from_slice(&response.body).map_err(|e| Error::ResponseParsing(e.to_string()))
}

fn parse_lenient(response: &HttpResponse) -> Option<Value> {
    if response.is_blank() {
        return None;
    }

    serde_json::from_slice(&response.body).ok()
}
