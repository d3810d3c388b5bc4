use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use super::{error::SortedSetError, store::*};

type Members = Vec<(f64, String)>;

fn compare(a: &(f64, String), b: &(f64, String)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1))
}

/// An in-process sorted set store. Clones share the same sets.
#[derive(Debug, Clone, Default)]
pub struct MemorySortedSet {
    sets: Arc<RwLock<HashMap<String, Members>>>,
}

impl MemorySortedSet {
    pub fn new() -> Self {
        Self::default()
    }
}

fn in_range(score: f64, min: ScoreBound, max: ScoreBound) -> bool {
    min.admits_as_min(score) && max.admits_as_max(score)
}

#[async_trait]
impl SortedSetStore for MemorySortedSet {
    #[instrument(name = "relay_pagination.memory_sorted_set.range_by_score", skip(self))]
    async fn range_by_score(
        &self,
        key: &str,
        min: ScoreBound,
        max: ScoreBound,
        rev: bool,
        limit: Option<usize>,
    ) -> Result<Vec<(String, f64)>, SortedSetError> {
        let sets = self.sets.read().await;
        let Some(members) = sets.get(key) else {
            return Ok(Vec::new());
        };
        let matching = members
            .iter()
            .filter(|(score, _)| in_range(*score, min, max))
            .map(|(score, member)| (member.clone(), *score));
        let limit = limit.unwrap_or(usize::MAX);
        let res: Vec<(String, f64)> = if rev {
            matching.rev().take(limit).collect()
        } else {
            matching.take(limit).collect()
        };
        Ok(res)
    }

    #[instrument(name = "relay_pagination.memory_sorted_set.count", skip(self))]
    async fn count(
        &self,
        key: &str,
        min: ScoreBound,
        max: ScoreBound,
    ) -> Result<u64, SortedSetError> {
        let sets = self.sets.read().await;
        Ok(sets
            .get(key)
            .map(|members| {
                members
                    .iter()
                    .filter(|(score, _)| in_range(*score, min, max))
                    .count() as u64
            })
            .unwrap_or(0))
    }

    #[instrument(name = "relay_pagination.memory_sorted_set.card", skip(self))]
    async fn card(&self, key: &str) -> Result<u64, SortedSetError> {
        let sets = self.sets.read().await;
        Ok(sets.get(key).map(|members| members.len() as u64).unwrap_or(0))
    }

    #[instrument(name = "relay_pagination.memory_sorted_set.add", skip(self))]
    async fn add(&self, key: &str, member: &str, score: f64) -> Result<bool, SortedSetError> {
        if score.is_nan() {
            return Err(SortedSetError::InvalidScore(score));
        }
        let mut sets = self.sets.write().await;
        let members = sets.entry(key.to_string()).or_default();
        let existed = match members.iter().position(|(_, m)| m == member) {
            Some(idx) => {
                members.remove(idx);
                true
            }
            None => false,
        };
        let entry = (score, member.to_string());
        let idx = members
            .binary_search_by(|other| compare(other, &entry))
            .unwrap_or_else(|idx| idx);
        members.insert(idx, entry);
        Ok(!existed)
    }

    #[instrument(name = "relay_pagination.memory_sorted_set.remove", skip(self))]
    async fn remove(&self, key: &str, member: &str) -> Result<bool, SortedSetError> {
        let mut sets = self.sets.write().await;
        let Some(members) = sets.get_mut(key) else {
            return Ok(false);
        };
        let removed = match members.iter().position(|(_, m)| m == member) {
            Some(idx) => {
                members.remove(idx);
                true
            }
            None => false,
        };
        if members.is_empty() {
            sets.remove(key);
        }
        Ok(removed)
    }
}
