use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortedSetError {
    #[error("SortedSetError - Unavailable: {0}")]
    Unavailable(String),
    #[error("SortedSetError - InvalidScore: {0}")]
    InvalidScore(f64),
}
