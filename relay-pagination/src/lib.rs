//! Relay-style keyset pagination.
//!
//! Collections are paged with opaque cursors rather than offsets. A
//! [`Paginator`] answers `first`/`after` and `last`/`before` requests with a
//! [`Page`] of items, each carrying its own cursor, plus [`PageInfo`]
//! telling whether more items exist on either side.
//!
//! Two backends are provided: [`relational::RelationalPaginator`] for
//! tables ordered by creation time and [`sorted_set::SortedSetPaginator`]
//! for score-ordered sets. Both share one keyset planner, so they agree on
//! ordering and page info rules.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

pub mod config;
pub mod error;
pub mod extract;
mod keyset;
mod paginator;
pub mod relational;
pub mod sorted_set;

pub use config::*;
pub use error::*;
pub use paginator::*;
pub use relay_types::*;
