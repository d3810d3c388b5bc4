use thiserror::Error;

use relay_types::CursorError;

use crate::sorted_set::SortedSetError;

#[derive(Error, Debug)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("BackendError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("BackendError - SortedSet: {0}")]
    SortedSet(#[from] SortedSetError),
}

#[derive(Error, Debug)]
pub enum PaginationError {
    #[error("PaginationError - InvalidCursor: {0}")]
    InvalidCursor(#[from] CursorError),
    #[error("PaginationError - ConflictingArguments: first and last cannot both be set")]
    ConflictingArguments,
    #[error("PaginationError - Backend: {0}")]
    Backend(#[from] BackendError),
}

impl From<sqlx::Error> for PaginationError {
    fn from(e: sqlx::Error) -> Self {
        Self::Backend(BackendError::Sqlx(e))
    }
}

impl From<SortedSetError> for PaginationError {
    fn from(e: SortedSetError) -> Self {
        Self::Backend(BackendError::SortedSet(e))
    }
}
