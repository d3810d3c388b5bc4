//! Pagination over a score-ordered set.
//!
//! Higher scores are presented first. Cursors carry only the score, so
//! members that share a score with a page's edge member can be skipped by
//! the next page.

mod error;
mod memory;
mod store;

use async_trait::async_trait;
use tracing::instrument;

use std::sync::Arc;

use relay_types::{Arguments, ListDirection, Page, ScoreCursor};

use crate::{
    config::PaginatorConfig,
    error::{BackendError, PaginationError},
    keyset::{self, KeysetSource},
    paginator::Paginator,
};

pub use error::*;
pub use memory::*;
pub use store::*;

/// A member as read from the store, before mapping into the domain type.
#[derive(Debug, Clone, PartialEq)]
struct ScoredMember {
    member: String,
    score: f64,
}

type MapFn<T> = Arc<dyn Fn(String, f64) -> T + Send + Sync>;

pub struct SortedSetPaginator<S, T> {
    store: S,
    key: String,
    map_fn: MapFn<T>,
    config: PaginatorConfig,
}

impl<S: Clone, T> Clone for SortedSetPaginator<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
            map_fn: Arc::clone(&self.map_fn),
            config: self.config.clone(),
        }
    }
}

impl<S, T> SortedSetPaginator<S, T>
where
    S: SortedSetStore,
{
    pub fn new(
        store: S,
        key: impl Into<String>,
        map_fn: impl Fn(String, f64) -> T + Send + Sync + 'static,
    ) -> Self {
        Self::with_config(store, key, map_fn, PaginatorConfig::default())
    }

    pub fn with_config(
        store: S,
        key: impl Into<String>,
        map_fn: impl Fn(String, f64) -> T + Send + Sync + 'static,
        config: PaginatorConfig,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            map_fn: Arc::new(map_fn),
            config,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn bounds(bound: Option<&ScoreCursor>, direction: ListDirection) -> (ScoreBound, ScoreBound) {
    let exclusive = |b: &ScoreCursor| ScoreBound::Exclusive(b.score);
    match direction {
        ListDirection::Descending => (
            ScoreBound::NegInfinity,
            bound.map(exclusive).unwrap_or(ScoreBound::PosInfinity),
        ),
        ListDirection::Ascending => (
            bound.map(exclusive).unwrap_or(ScoreBound::NegInfinity),
            ScoreBound::PosInfinity,
        ),
    }
}

/// One set inside a store, as seen by the planner.
struct StoreSource<'a, S> {
    store: &'a S,
    key: &'a str,
}

#[async_trait]
impl<S: SortedSetStore> KeysetSource for StoreSource<'_, S> {
    type Key = ScoreCursor;
    type Entry = ScoredMember;

    #[instrument(
        name = "relay_pagination.sorted_set.fetch",
        skip(self, bound),
        fields(key = %self.key),
        err(level = "warn")
    )]
    async fn fetch(
        &self,
        bound: Option<&ScoreCursor>,
        direction: ListDirection,
        limit: usize,
    ) -> Result<Vec<ScoredMember>, BackendError> {
        let (min, max) = bounds(bound, direction);
        let rev = direction == ListDirection::Descending;
        let members = self
            .store
            .range_by_score(self.key, min, max, rev, Some(limit))
            .await?;
        Ok(members
            .into_iter()
            .map(|(member, score)| ScoredMember { member, score })
            .collect())
    }

    #[instrument(
        name = "relay_pagination.sorted_set.count_beyond",
        skip(self, bound),
        fields(key = %self.key),
        err(level = "warn")
    )]
    async fn count_beyond(
        &self,
        bound: Option<&ScoreCursor>,
        direction: ListDirection,
    ) -> Result<u64, BackendError> {
        let (min, max) = bounds(bound, direction);
        Ok(self.store.count(self.key, min, max).await?)
    }

    #[instrument(
        name = "relay_pagination.sorted_set.count_all",
        skip(self),
        fields(key = %self.key),
        err(level = "warn")
    )]
    async fn count_all(&self) -> Result<u64, BackendError> {
        Ok(self.store.card(self.key).await?)
    }

    fn key_of(&self, entry: &ScoredMember) -> ScoreCursor {
        ScoreCursor::new(entry.score)
    }
}

#[async_trait]
impl<S, T> Paginator<T> for SortedSetPaginator<S, T>
where
    S: SortedSetStore,
    T: Send,
{
    #[instrument(
        name = "relay_pagination.sorted_set.list_items",
        skip(self),
        fields(key = %self.key),
        err(level = "warn")
    )]
    async fn list_items(&self, args: Arguments) -> Result<Page<T>, PaginationError> {
        let source = StoreSource {
            store: &self.store,
            key: &self.key,
        };
        let page = keyset::list_items(&source, args, &self.config).await?;
        Ok(page.map(|ScoredMember { member, score }| (self.map_fn)(member, score)))
    }
}
