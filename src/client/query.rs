//! Query string encoding for JSON parameters.
//!
//! Nested objects become `key[child]`, arrays become repeated `key[]`,
//! strings are sent unquoted and `null` as an empty value. This matches
//! the sparse fieldset convention, e.g. `fields[users]=name,email`.

use serde_json::{Map, Value};
use url::Url;

/// Flattens parameters into ordered key/value pairs.
#[must_use]
pub fn flatten(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push(&mut pairs, key.clone(), value);
    }
    pairs
}

fn push(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (child, nested) in map {
                push(pairs, format!("{key}[{child}]"), nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                push(pairs, format!("{key}[]"), item);
            }
        }
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Null => pairs.push((key, String::new())),
        Value::Bool(_) | Value::Number(_) => pairs.push((key, value.to_string())),
    }
}

/// Appends encoded parameters to `url`. Empty params leave the URL untouched.
pub fn append(url: &mut Url, params: &Map<String, Value>) {
    let pairs = flatten(params);
    if pairs.is_empty() {
        return;
    }
    url.query_pairs_mut().extend_pairs(pairs);
}
