//! Configuration types for catalog client construction.

use std::collections::BTreeMap;

/// Configuration for catalog client construction.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL for the upstream species catalog.
    pub catalog_url: String,
    /// Optional user agent sent with every request.
    pub user_agent: Option<String>,
    /// Additional headers to include in requests.
    pub extra_headers: BTreeMap<String, String>,
}

impl CatalogConfig {
    pub fn new(catalog_url: impl Into<String>) -> Self {
        CatalogConfig {
            catalog_url: catalog_url.into(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
        }
    }
}
