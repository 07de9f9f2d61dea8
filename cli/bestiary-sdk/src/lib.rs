//! Aggregation layer over the upstream species catalog.
//!
//! Normalizes raw species + profile pairs into one canonical record model
//! and implements the pagination, exact/substring search and group-based
//! views that the upstream API does not natively provide:
//!
//! - [`providers::species::SpeciesService`]: the aggregation service
//! - [`models::record::SpeciesRecord`]: the canonical record
//! - [`models::page::Page`]: page-shaped responses

pub mod models;
pub mod providers;

// Re-export the catalog client so consumers can depend on this crate alone.
pub use bestiary_catalog::{CatalogClient, CatalogConfig, CatalogError, CatalogOp, ClientTrait};
