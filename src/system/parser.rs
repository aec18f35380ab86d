//! hpilo_cli `--json` output parser.
//! Converts the printed return value of an iLO method into the shapes the
//! operations expect.

use serde_json::{Map, Value};

use crate::error::IloError;

/// Parse stdout into a JSON value. Methods without a return value print
/// nothing (or `null`).
pub fn parse_output(stdout: &str) -> Result<Value, IloError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(trimmed).map_err(|e| IloError::MalformedResponse(format!("{}: {}", e, excerpt(trimmed))))
}

pub fn expect_string(value: Value, method: &str) -> Result<String, IloError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(unexpected(method, "a string", &other)),
    }
}

pub fn expect_object(value: Value, method: &str) -> Result<Map<String, Value>, IloError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(unexpected(method, "an object", &other)),
    }
}

/// List of strings, e.g. user names or boot devices.
pub fn expect_string_list(value: Value, method: &str) -> Result<Vec<String>, IloError> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(unexpected(method, "a list", &other)),
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => Err(unexpected(method, "a list of strings", &other)),
        })
        .collect()
}

fn unexpected(method: &str, wanted: &str, got: &Value) -> IloError {
    IloError::MalformedResponse(format!("{} returned {}, expected {}", method, excerpt(&got.to_string()), wanted))
}

fn excerpt(text: &str) -> String {
    const MAX: usize = 80;
    match text.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
