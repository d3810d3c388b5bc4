use derive_builder::Builder;
use regex::Regex;
use serde::{Deserialize, Serialize};

use std::sync::OnceLock;

use crate::error::ConfigError;

static IDENTIFIER: OnceLock<Regex> = OnceLock::new();

fn identifier() -> &'static Regex {
    IDENTIFIER.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
            .expect("identifier pattern is valid")
    })
}

pub(crate) fn validate_identifier(kind: &str, value: &str) -> Result<(), ConfigError> {
    if identifier().is_match(value) {
        Ok(())
    } else {
        Err(ConfigError(format!("{kind} '{value}' is not a valid identifier")))
    }
}

fn default_id_column() -> String {
    "id".to_string()
}

fn default_created_at_column() -> String {
    "created_at".to_string()
}

/// Names the table a [`PgTable`](super::PgTable) reads and its ordering columns.
/// Names are interpolated into SQL, so only plain (optionally schema
/// qualified) identifiers are accepted.
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct PgTableConfig {
    #[builder(setter(into))]
    pub(super) table: String,
    #[builder(setter(into), default = "default_id_column()")]
    #[serde(default = "default_id_column")]
    pub(super) id_column: String,
    #[builder(setter(into), default = "default_created_at_column()")]
    #[serde(default = "default_created_at_column")]
    pub(super) created_at_column: String,
    /// Postgres type of the id column, e.g. `uuid` or `bigint`. When set the
    /// cursor id is cast to it and the column is compared as is, so an index
    /// on `(created_at, id)` serves the page. When unset the column is
    /// compared as `id::text`, which works for any type but needs an
    /// expression index on `(created_at, (id::text))` to avoid a sort.
    #[builder(setter(into, strip_option), default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) id_type: Option<String>,
}

impl PgTableConfig {
    pub fn builder() -> PgTableConfigBuilder {
        PgTableConfigBuilder::default()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        validate_identifier("table", &self.table)?;
        validate_identifier("id_column", &self.id_column)?;
        validate_identifier("created_at_column", &self.created_at_column)?;
        if let Some(id_type) = &self.id_type {
            validate_identifier("id_type", id_type)?;
        }
        Ok(())
    }
}

impl PgTableConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("table", self.table.as_ref()),
            ("id_column", self.id_column.as_ref()),
            ("created_at_column", self.created_at_column.as_ref()),
        ];
        for (kind, value) in fields {
            if let Some(value) = value {
                validate_identifier(kind, value).map_err(|e| e.0)?;
            }
        }
        if let Some(Some(id_type)) = &self.id_type {
            validate_identifier("id_type", id_type).map_err(|e| e.0)?;
        }
        Ok(())
    }
}
