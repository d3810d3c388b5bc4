//! Opaque cursor tokens.
//!
//! A cursor is the raw ordering key of an item rendered as text and wrapped
//! in url-safe base64 so it can travel inside a query string or a JSON
//! document untouched.

mod error;

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::*;

const SEPARATOR: char = '|';
const SUBSEC_SEPARATOR: char = '.';

/// A position in an ordered collection that can be turned into an opaque
/// token and back.
pub trait CursorKey: Sized {
    fn encode_cursor(&self) -> String;

    fn decode_cursor(s: &str) -> Result<Self, CursorError>;
}

fn encode_raw(raw: &str) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

fn decode_raw(s: &str) -> Result<String, CursorError> {
    let bytes = general_purpose::URL_SAFE_NO_PAD.decode(s.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Position of a row ordered by its creation timestamp, with the row id
/// breaking ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampCursor {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl TimestampCursor {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
        }
    }
}

impl CursorKey for TimestampCursor {
    fn encode_cursor(&self) -> String {
        let raw = format!(
            "{}{SEPARATOR}{}{SUBSEC_SEPARATOR}{:09}",
            self.id,
            self.created_at.timestamp(),
            self.created_at.timestamp_subsec_nanos()
        );
        encode_raw(&raw)
    }

    fn decode_cursor(s: &str) -> Result<Self, CursorError> {
        let raw = decode_raw(s)?;
        // the timestamp never contains the separator, so the last one is the split point
        let (id, created_at) = raw
            .rsplit_once(SEPARATOR)
            .ok_or(CursorError::MissingSeparator)?;
        let created_at = parse_epoch_nanos(created_at)?;
        Ok(Self {
            id: id.to_string(),
            created_at,
        })
    }
}

/// Parses `<unix seconds>.<9 digit nanoseconds>`. Seconds may be negative,
/// nanoseconds always count forward from them.
fn parse_epoch_nanos(raw: &str) -> Result<DateTime<Utc>, CursorError> {
    let invalid = || CursorError::InvalidTimestamp(raw.to_string());
    let (secs, nanos) = raw.split_once(SUBSEC_SEPARATOR).ok_or_else(invalid)?;
    if nanos.len() != 9 || !nanos.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let secs: i64 = secs.parse().map_err(|_| invalid())?;
    let nanos: u32 = nanos.parse().map_err(|_| invalid())?;
    DateTime::from_timestamp(secs, nanos).ok_or_else(invalid)
}

/// Position of a member in a score-ordered set.
///
/// Only the score is carried: members sharing a score cannot be told apart
/// by the cursor, so an exclusive bound skips all of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCursor {
    pub score: f64,
}

impl ScoreCursor {
    pub fn new(score: f64) -> Self {
        Self { score }
    }
}

impl CursorKey for ScoreCursor {
    fn encode_cursor(&self) -> String {
        encode_raw(&self.score.to_string())
    }

    fn decode_cursor(s: &str) -> Result<Self, CursorError> {
        let raw = decode_raw(s)?;
        let score: f64 = raw.parse()?;
        if score.is_nan() {
            return Err(CursorError::InvalidScore(raw));
        }
        Ok(Self { score })
    }
}

macro_rules! impl_display_from_str {
    ($($cursor:ty),*) => {
        $(
            impl std::fmt::Display for $cursor {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.encode_cursor())
                }
            }

            impl std::str::FromStr for $cursor {
                type Err = CursorError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::decode_cursor(s)
                }
            }
        )*
    };
}

impl_display_from_str!(TimestampCursor, ScoreCursor);
