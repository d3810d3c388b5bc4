//! The keyset planner shared by every backend.
//!
//! Pages are always presented newest first (descending ordering key).
//! A forward page (`first`/`after`) reads descending below its bound. A
//! backward page (`last`/`before`) reads ascending above its bound and is
//! then reversed, so both directions agree on the order of any window.
//! Neighbouring pages are detected with existence counts anchored at the
//! edge items of the returned page, never by over-fetching.

use async_trait::async_trait;
use tracing::debug;

use relay_types::{Arguments, CursorKey, Item, ListDirection, Page, PageInfo};

use crate::{
    config::PaginatorConfig,
    error::{BackendError, PaginationError},
};

/// A collection that can answer ordered range reads and counts relative to
/// a key.
///
/// `ListDirection::Descending` means "strictly below the bound, highest
/// first", `ListDirection::Ascending` means "strictly above the bound,
/// lowest first". A missing bound leaves that side unbounded.
#[async_trait]
pub(crate) trait KeysetSource: Send + Sync {
    type Key: CursorKey + Send + Sync;
    type Entry: Send;

    async fn fetch(
        &self,
        bound: Option<&Self::Key>,
        direction: ListDirection,
        limit: usize,
    ) -> Result<Vec<Self::Entry>, BackendError>;

    async fn count_beyond(
        &self,
        bound: Option<&Self::Key>,
        direction: ListDirection,
    ) -> Result<u64, BackendError>;

    /// Size of the whole collection. Backends with a cheaper cardinality
    /// read override this.
    async fn count_all(&self) -> Result<u64, BackendError> {
        self.count_beyond(None, ListDirection::Descending).await
    }

    fn key_of(&self, entry: &Self::Entry) -> Self::Key;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Forward,
    Backward,
}

impl Mode {
    fn fetch_direction(self) -> ListDirection {
        match self {
            Mode::Forward => ListDirection::Descending,
            Mode::Backward => ListDirection::Ascending,
        }
    }
}

pub(crate) async fn list_items<S: KeysetSource + ?Sized>(
    source: &S,
    args: Arguments,
    config: &PaginatorConfig,
) -> Result<Page<S::Entry>, PaginationError> {
    let Arguments {
        first,
        after,
        last,
        before,
    } = args;
    let (mode, limit, cursor) = match (first, last) {
        (Some(_), Some(_)) => return Err(PaginationError::ConflictingArguments),
        (Some(first), None) => (Mode::Forward, first, after),
        (None, Some(last)) => (Mode::Backward, last, before),
        (None, None) => (Mode::Forward, config.default_page_size, after),
    };
    let bound = cursor
        .as_deref()
        .map(<S::Key as CursorKey>::decode_cursor)
        .transpose()?;

    let mut entries = if limit == 0 {
        Vec::new()
    } else {
        source
            .fetch(bound.as_ref(), mode.fetch_direction(), limit)
            .await?
    };
    if mode == Mode::Backward {
        entries.reverse();
    }

    let keys: Vec<S::Key> = entries.iter().map(|entry| source.key_of(entry)).collect();

    let (has_previous_page, has_next_page) = match (keys.first(), keys.last()) {
        (Some(first_key), Some(last_key)) => {
            let has_previous = source
                .count_beyond(Some(first_key), ListDirection::Ascending)
                .await?
                > 0;
            let has_next = source
                .count_beyond(Some(last_key), ListDirection::Descending)
                .await?
                > 0;
            (has_previous, has_next)
        }
        _ => match mode {
            Mode::Forward => {
                let has_next = source
                    .count_beyond(bound.as_ref(), ListDirection::Descending)
                    .await?
                    > 0;
                (bound.is_some(), has_next)
            }
            Mode::Backward => {
                let has_previous = source
                    .count_beyond(bound.as_ref(), ListDirection::Ascending)
                    .await?
                    > 0;
                (has_previous, bound.is_some())
            }
        },
    };

    let total_count = if config.include_total_count {
        Some(source.count_all().await?)
    } else {
        None
    };

    let items: Vec<Item<S::Entry>> = entries
        .into_iter()
        .zip(keys.iter())
        .map(|(node, key)| Item {
            node,
            cursor: key.encode_cursor(),
        })
        .collect();

    let page_info = PageInfo {
        has_next_page,
        has_previous_page,
        start_cursor: items.first().map(|item| item.cursor.clone()),
        end_cursor: items.last().map(|item| item.cursor.clone()),
        total_count,
    };
    debug!(
        ?mode,
        limit,
        returned = items.len(),
        has_next_page,
        has_previous_page,
        "keyset page computed"
    );

    Ok(Page { items, page_info })
}
