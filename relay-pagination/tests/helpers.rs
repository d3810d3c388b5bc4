#![allow(dead_code)]
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::distr::{Alphanumeric, SampleString};
use tokio::sync::RwLock;

use std::sync::Arc;

use relay_pagination::{
    relational::*, sorted_set::*, Arguments, BackendError, ListDirection, Page, Paginator,
    TimestampCursor,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

pub fn event_key(event: &Event) -> TimestampCursor {
    TimestampCursor::new(event.id.clone(), event.created_at)
}

pub fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// `item{i}` created `i` seconds before `epoch()`, so `item0` is the newest.
pub fn test_events(n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| Event {
            id: uuid::Uuid::new_v4().to_string(),
            name: format!("item{i}"),
            created_at: epoch() - Duration::seconds(i as i64),
        })
        .collect()
}

pub fn test_set_key() -> String {
    format!(
        "relay-test-{}",
        Alphanumeric.sample_string(&mut rand::rng(), 16)
    )
}

/// Rows kept in memory, compared the same way `PgTable` compares them.
#[derive(Clone, Default)]
pub struct MemoryTable {
    rows: Arc<RwLock<Vec<Event>>>,
}

impl MemoryTable {
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(events)),
        }
    }

    pub async fn insert(&self, event: Event) {
        self.rows.write().await.push(event);
    }

    async fn beyond(
        &self,
        bound: Option<&TimestampCursor>,
        direction: ListDirection,
    ) -> Vec<Event> {
        let rows = self.rows.read().await;
        let mut matching: Vec<Event> = rows
            .iter()
            .filter(|row| match bound {
                None => true,
                Some(bound) => {
                    let key = (row.created_at, row.id.as_str());
                    let bound = (bound.created_at, bound.id.as_str());
                    match direction {
                        ListDirection::Descending => key < bound,
                        ListDirection::Ascending => key > bound,
                    }
                }
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        if direction == ListDirection::Descending {
            matching.reverse();
        }
        matching
    }
}

#[async_trait]
impl RowSource for MemoryTable {
    type Row = Event;

    async fn fetch_rows(
        &self,
        bound: Option<&TimestampCursor>,
        direction: ListDirection,
        limit: usize,
    ) -> Result<Vec<Event>, BackendError> {
        let mut rows = self.beyond(bound, direction).await;
        rows.truncate(limit);
        Ok(rows)
    }

    async fn count_rows(
        &self,
        bound: Option<&TimestampCursor>,
        direction: ListDirection,
    ) -> Result<u64, BackendError> {
        Ok(self.beyond(bound, direction).await.len() as u64)
    }
}

pub fn relational_paginator(events: Vec<Event>) -> RelationalPaginator<MemoryTable> {
    RelationalPaginator::new(MemoryTable::with_events(events), event_key)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub score: f64,
}

/// `item{i}` scored `n - i`, so `item0` ranks highest.
pub async fn seeded_sorted_set(
    n: usize,
) -> anyhow::Result<(MemorySortedSet, SortedSetPaginator<MemorySortedSet, Player>)> {
    let store = MemorySortedSet::new();
    let key = test_set_key();
    for i in 0..n {
        store
            .add(&key, &format!("item{i}"), (n - i) as f64)
            .await?;
    }
    let paginator = SortedSetPaginator::new(store.clone(), key, |name, score| Player {
        name,
        score,
    });
    Ok((store, paginator))
}

pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Event {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Player {
    fn name(&self) -> &str {
        &self.name
    }
}

pub fn names<T: Named>(page: &Page<T>) -> Vec<String> {
    page.nodes().map(|node| node.name().to_string()).collect()
}

pub fn item_names(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("item{i}")).collect()
}

/// Follows `end_cursor` until `has_next_page` turns false.
pub async fn walk_forward<T: Named>(
    paginator: &impl Paginator<T>,
    page_size: usize,
) -> anyhow::Result<Vec<String>> {
    let mut visited = Vec::new();
    let mut args = Arguments::forward(page_size);
    loop {
        let page = paginator.list_items(args).await?;
        visited.extend(names(&page));
        if !page.page_info.has_next_page {
            break;
        }
        let end_cursor = page
            .page_info
            .end_cursor
            .expect("non-empty page has an end cursor");
        args = Arguments::forward(page_size).after(end_cursor);
    }
    Ok(visited)
}

/// Follows `start_cursor` until `has_previous_page` turns false, returning
/// the pages in presentation order.
pub async fn walk_backward<T: Named>(
    paginator: &impl Paginator<T>,
    page_size: usize,
) -> anyhow::Result<Vec<Vec<String>>> {
    let mut pages = Vec::new();
    let mut args = Arguments::backward(page_size);
    loop {
        let page = paginator.list_items(args).await?;
        pages.push(names(&page));
        if !page.page_info.has_previous_page {
            break;
        }
        let start_cursor = page
            .page_info
            .start_cursor
            .expect("non-empty page has a start cursor");
        args = Arguments::backward(page_size).before(start_cursor);
    }
    pages.reverse();
    Ok(pages)
}
