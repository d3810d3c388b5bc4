use thiserror::Error;

#[derive(Error, Debug)]
pub enum CursorError {
    #[error("CursorError - Base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("CursorError - Utf8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("CursorError - MissingSeparator")]
    MissingSeparator,
    #[error("CursorError - InvalidTimestamp: {0}")]
    InvalidTimestamp(String),
    #[error("CursorError - InvalidScore: {0}")]
    InvalidScore(String),
}

impl From<std::num::ParseFloatError> for CursorError {
    fn from(e: std::num::ParseFloatError) -> Self {
        Self::InvalidScore(e.to_string())
    }
}
