use async_trait::async_trait;

use relay_types::{Arguments, Page};

use crate::error::PaginationError;

/// Lists a collection one page at a time.
///
/// A page is all-or-nothing: any error aborts the call and no partial page
/// is returned. Implementations keep no state between calls.
#[async_trait]
pub trait Paginator<T>: Send + Sync {
    async fn list_items(&self, args: Arguments) -> Result<Page<T>, PaginationError>;
}
