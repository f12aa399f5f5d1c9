//! REST handlers.
//!
//! Bodies arrive as raw strings and are parsed here rather than through
//! typed extractors: the boundary contract promises specific 400 messages
//! for missing and mis-typed fields, which a rejected typed extractor
//! cannot produce.

pub mod mfa;
pub mod verification;

use crate::domain::error::ApiError;
use serde_json::Value;

/// Parse a request body as JSON or produce the boundary's 400.
pub(crate) fn parse_body(body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))
}

/// A field counts as missing when it is absent, null, or an empty string.
pub(crate) fn field_missing(body: &Value, name: &str) -> bool {
    match body.get(name) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// The field's string value, if it is a string.
pub(crate) fn field_as_str<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    body.get(name).and_then(Value::as_str)
}
