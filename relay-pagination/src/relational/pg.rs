use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use std::marker::PhantomData;

use relay_types::{ListDirection, TimestampCursor};

use super::{config::PgTableConfig, RowSource};
use crate::error::{BackendError, ConfigError};

/// A Postgres table ordered by `(created_at, id)`.
///
/// Without [`id_type`](super::PgTableConfigBuilder::id_type) the id is
/// compared in its text form, so any id column type works with the string
/// ids carried by cursors.
pub struct PgTable<R> {
    pool: PgPool,
    config: PgTableConfig,
    _phantom: PhantomData<fn() -> R>,
}

impl<R> Clone for PgTable<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            config: self.config.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<R> PgTable<R> {
    pub fn new(pool: &PgPool, config: PgTableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pool: pool.clone(),
            config,
            _phantom: PhantomData,
        })
    }
}

fn id_expr(config: &PgTableConfig) -> String {
    match config.id_type {
        Some(_) => config.id_column.clone(),
        None => format!("{}::text", config.id_column),
    }
}

fn push_predicate(
    config: &PgTableConfig,
    query_builder: &mut QueryBuilder<'_, Postgres>,
    bound: Option<&TimestampCursor>,
    direction: ListDirection,
) {
    let Some(bound) = bound else {
        return;
    };
    let comp = match direction {
        ListDirection::Descending => "<",
        ListDirection::Ascending => ">",
    };
    query_builder.push(format!(
        " WHERE ({}, {}) {comp} (",
        config.created_at_column,
        id_expr(config)
    ));
    query_builder.push_bind(bound.created_at);
    query_builder.push(", ");
    match &config.id_type {
        Some(id_type) => {
            query_builder.push("CAST(");
            query_builder.push_bind(bound.id.clone());
            query_builder.push(format!(" AS {id_type})"));
        }
        None => {
            query_builder.push_bind(bound.id.clone());
        }
    }
    query_builder.push(")");
}

fn select_range(
    config: &PgTableConfig,
    bound: Option<&TimestampCursor>,
    direction: ListDirection,
    limit: usize,
) -> QueryBuilder<'static, Postgres> {
    let mut query_builder = QueryBuilder::new(format!("SELECT * FROM {}", config.table));
    push_predicate(config, &mut query_builder, bound, direction);
    let dir = match direction {
        ListDirection::Descending => "DESC",
        ListDirection::Ascending => "ASC",
    };
    query_builder.push(format!(
        " ORDER BY {} {dir}, {} {dir} LIMIT ",
        config.created_at_column,
        id_expr(config)
    ));
    query_builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
    query_builder
}

fn count_range(
    config: &PgTableConfig,
    bound: Option<&TimestampCursor>,
    direction: ListDirection,
) -> QueryBuilder<'static, Postgres> {
    let mut query_builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", config.table));
    push_predicate(config, &mut query_builder, bound, direction);
    query_builder
}

#[async_trait]
impl<R> RowSource for PgTable<R>
where
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
{
    type Row = R;

    #[instrument(
        name = "relay_pagination.pg_table.fetch_rows",
        skip(self, bound),
        fields(table = %self.config.table),
        err(level = "warn")
    )]
    async fn fetch_rows(
        &self,
        bound: Option<&TimestampCursor>,
        direction: ListDirection,
        limit: usize,
    ) -> Result<Vec<R>, BackendError> {
        let mut query_builder = select_range(&self.config, bound, direction, limit);
        let rows = query_builder
            .build_query_as::<R>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    #[instrument(
        name = "relay_pagination.pg_table.count_rows",
        skip(self, bound),
        fields(table = %self.config.table),
        err(level = "warn")
    )]
    async fn count_rows(
        &self,
        bound: Option<&TimestampCursor>,
        direction: ListDirection,
    ) -> Result<u64, BackendError> {
        let mut query_builder = count_range(&self.config, bound, direction);
        let count: i64 = query_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}
