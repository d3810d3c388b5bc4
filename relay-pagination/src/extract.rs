//! Reads cursor fields off any serializable value.
//!
//! For callers that would rather not write a key function by hand: the
//! value is serialized and the id and creation time are looked up by field
//! name.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use relay_types::{CursorKey, TimestampCursor};

pub const DEFAULT_ID_FIELD: &str = "id";
pub const DEFAULT_CREATED_AT_FIELD: &str = "created_at";

#[derive(Error, Debug)]
pub enum CursorFieldError {
    #[error("CursorFieldError - Serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("CursorFieldError - FieldNotFound: {0}")]
    FieldNotFound(String),
    #[error("CursorFieldError - InvalidValueType: '{field}' is not {expected}")]
    InvalidValueType {
        field: String,
        expected: &'static str,
    },
}

fn invalid(field: &str, expected: &'static str) -> CursorFieldError {
    CursorFieldError::InvalidValueType {
        field: field.to_string(),
        expected,
    }
}

pub fn timestamp_cursor_from<T: Serialize>(
    value: &T,
    id_field: &str,
    created_at_field: &str,
) -> Result<TimestampCursor, CursorFieldError> {
    let value = serde_json::to_value(value)?;
    let Value::Object(fields) = value else {
        return Err(invalid("<root>", "a struct or map"));
    };

    let id = match fields.get(id_field) {
        None => return Err(CursorFieldError::FieldNotFound(id_field.to_string())),
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        Some(_) => return Err(invalid(id_field, "a string or number")),
    };

    let created_at = match fields.get(created_at_field) {
        None => {
            return Err(CursorFieldError::FieldNotFound(
                created_at_field.to_string(),
            ))
        }
        Some(Value::String(ts)) => DateTime::parse_from_rfc3339(ts)
            .map_err(|_| invalid(created_at_field, "an RFC 3339 timestamp"))?
            .with_timezone(&Utc),
        Some(_) => return Err(invalid(created_at_field, "an RFC 3339 timestamp")),
    };

    Ok(TimestampCursor { id, created_at })
}

pub fn encode_timestamp_cursor<T: Serialize>(value: &T) -> Result<String, CursorFieldError> {
    timestamp_cursor_from(value, DEFAULT_ID_FIELD, DEFAULT_CREATED_AT_FIELD)
        .map(|cursor| cursor.encode_cursor())
}

/// Like [`encode_timestamp_cursor`] but panics instead of returning an error.
///
/// # Panics
///
/// If `value` does not serialize to a map carrying a string or numeric `id`
/// and an RFC 3339 `created_at`. Only use it on types known to have both
/// fields, never on untrusted input.
pub fn must_encode_timestamp_cursor<T: Serialize>(value: &T) -> String {
    match encode_timestamp_cursor(value) {
        Ok(cursor) => cursor,
        Err(e) => panic!("could not compute cursor: {e}"),
    }
}
