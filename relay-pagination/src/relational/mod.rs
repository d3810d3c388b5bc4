//! Pagination over a table ordered by creation time.
//!
//! Rows are presented newest first. Rows created at the same instant are
//! ordered by id so no row is skipped or repeated at a page boundary.

mod config;
mod pg;

use async_trait::async_trait;
use tracing::instrument;

use std::sync::Arc;

use relay_types::{Arguments, ListDirection, Page, TimestampCursor};

use crate::{
    config::PaginatorConfig,
    error::{BackendError, PaginationError},
    keyset::{self, KeysetSource},
    paginator::Paginator,
};

pub use config::*;
pub use pg::*;

/// Ordered reads over one table.
///
/// Rows are compared by `(created_at, id)`. `Descending` returns rows
/// strictly below the bound, latest first. `Ascending` returns rows
/// strictly above it, earliest first.
#[async_trait]
pub trait RowSource: Send + Sync {
    type Row: Send;

    async fn fetch_rows(
        &self,
        bound: Option<&TimestampCursor>,
        direction: ListDirection,
        limit: usize,
    ) -> Result<Vec<Self::Row>, BackendError>;

    async fn count_rows(
        &self,
        bound: Option<&TimestampCursor>,
        direction: ListDirection,
    ) -> Result<u64, BackendError>;
}

type KeyFn<R> = Arc<dyn Fn(&R) -> TimestampCursor + Send + Sync>;

pub struct RelationalPaginator<S: RowSource> {
    source: S,
    key_fn: KeyFn<S::Row>,
    config: PaginatorConfig,
}

impl<S: RowSource + Clone> Clone for RelationalPaginator<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            key_fn: Arc::clone(&self.key_fn),
            config: self.config.clone(),
        }
    }
}

impl<S: RowSource> RelationalPaginator<S> {
    /// `key_fn` reads the ordering key (id and creation time) off a row.
    pub fn new(
        source: S,
        key_fn: impl Fn(&S::Row) -> TimestampCursor + Send + Sync + 'static,
    ) -> Self {
        Self::with_config(source, key_fn, PaginatorConfig::default())
    }

    pub fn with_config(
        source: S,
        key_fn: impl Fn(&S::Row) -> TimestampCursor + Send + Sync + 'static,
        config: PaginatorConfig,
    ) -> Self {
        Self {
            source,
            key_fn: Arc::new(key_fn),
            config,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Pairs a row source with the key function for the planner.
struct KeyedRows<'a, S: RowSource> {
    source: &'a S,
    key_fn: &'a KeyFn<S::Row>,
}

#[async_trait]
impl<S: RowSource> KeysetSource for KeyedRows<'_, S> {
    type Key = TimestampCursor;
    type Entry = S::Row;

    async fn fetch(
        &self,
        bound: Option<&TimestampCursor>,
        direction: ListDirection,
        limit: usize,
    ) -> Result<Vec<S::Row>, BackendError> {
        self.source.fetch_rows(bound, direction, limit).await
    }

    async fn count_beyond(
        &self,
        bound: Option<&TimestampCursor>,
        direction: ListDirection,
    ) -> Result<u64, BackendError> {
        self.source.count_rows(bound, direction).await
    }

    fn key_of(&self, entry: &S::Row) -> TimestampCursor {
        (self.key_fn)(entry)
    }
}

#[async_trait]
impl<S: RowSource> Paginator<S::Row> for RelationalPaginator<S> {
    #[instrument(name = "relay_pagination.relational.list_items", skip(self), err(level = "warn"))]
    async fn list_items(&self, args: Arguments) -> Result<Page<S::Row>, PaginationError> {
        let rows = KeyedRows {
            source: &self.source,
            key_fn: &self.key_fn,
        };
        keyset::list_items(&rows, args, &self.config).await
    }
}
