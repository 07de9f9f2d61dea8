//! HTTP client for the upstream species catalog.
//!
//! This crate provides:
//! - HTTP client construction with timeouts and default headers
//! - The [`ClientTrait`] catalog interface and its HTTP implementation
//! - Wire types for the upstream endpoints
//! - Common error handling that distinguishes absence from failure
//!
//! Absence ("resource does not exist" upstream) is returned as `Ok(None)`,
//! never as an error. See [`error::CatalogError`] for the failure taxonomy.

mod client;
mod config;
mod error;
pub mod types;

pub use client::{CatalogClient, ClientTrait};
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogOp};
