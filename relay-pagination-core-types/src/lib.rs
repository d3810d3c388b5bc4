#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

pub mod cursor;
#[cfg(feature = "graphql")]
pub mod graphql;
pub mod query;

pub use cursor::*;
pub use query::*;
