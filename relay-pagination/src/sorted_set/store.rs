use async_trait::async_trait;

use super::error::SortedSetError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreBound {
    NegInfinity,
    PosInfinity,
    Inclusive(f64),
    Exclusive(f64),
}

impl ScoreBound {
    pub fn admits_as_min(self, score: f64) -> bool {
        match self {
            ScoreBound::NegInfinity => true,
            ScoreBound::PosInfinity => score == f64::INFINITY,
            ScoreBound::Inclusive(min) => score >= min,
            ScoreBound::Exclusive(min) => score > min,
        }
    }

    pub fn admits_as_max(self, score: f64) -> bool {
        match self {
            ScoreBound::NegInfinity => score == f64::NEG_INFINITY,
            ScoreBound::PosInfinity => true,
            ScoreBound::Inclusive(max) => score <= max,
            ScoreBound::Exclusive(max) => score < max,
        }
    }
}

/// Client of a score-ordered set store, addressed by key.
///
/// Members are ordered by score, members sharing a score by name. `rev`
/// returns the range highest score first. `add` and `remove` are only used
/// to seed fixtures.
#[async_trait]
pub trait SortedSetStore: Send + Sync {
    async fn range_by_score(
        &self,
        key: &str,
        min: ScoreBound,
        max: ScoreBound,
        rev: bool,
        limit: Option<usize>,
    ) -> Result<Vec<(String, f64)>, SortedSetError>;

    async fn count(&self, key: &str, min: ScoreBound, max: ScoreBound)
        -> Result<u64, SortedSetError>;

    async fn card(&self, key: &str) -> Result<u64, SortedSetError>;

    /// Returns `true` when the member was not present before.
    async fn add(&self, key: &str, member: &str, score: f64) -> Result<bool, SortedSetError>;

    /// Returns `true` when the member was present.
    async fn remove(&self, key: &str, member: &str) -> Result<bool, SortedSetError>;
}
