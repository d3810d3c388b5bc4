use derive_builder::Builder;
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: usize = 100;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct PaginatorConfig {
    /// Page size used when a request sets neither `first` nor `last`.
    #[builder(default = "DEFAULT_PAGE_SIZE")]
    #[serde(default = "default_page_size")]
    pub(crate) default_page_size: usize,
    /// Adds a full count of the collection to every page. Costs one extra round trip.
    #[builder(default)]
    #[serde(default)]
    pub(crate) include_total_count: bool,
}

impl PaginatorConfig {
    pub fn builder() -> PaginatorConfigBuilder {
        PaginatorConfigBuilder::default()
    }
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            include_total_count: false,
        }
    }
}

impl PaginatorConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(0) = self.default_page_size {
            return Err("default_page_size must be greater than 0".to_string());
        }
        Ok(())
    }
}
