//! Error handling for catalog operations.
//!
//! Absence of a resource is not an error: operations that can miss return
//! `Ok(None)`. [`CatalogError`] covers transport failures, unexpected
//! statuses and undecodable payloads, and always names the logical
//! operation that failed.

use std::fmt::Display;

use thiserror::Error;

/// The logical catalog operation an error originated from.
///
/// Carried inside [`CatalogError`] so user-visible messages can say which
/// request failed rather than just echoing an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOp {
    ListSpecies,
    GetSpecies,
    GetProfile,
    GroupMembers,
    ListGroups,
}

impl Display for CatalogOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CatalogOp::ListSpecies => "species listing",
            CatalogOp::GetSpecies => "species fetch",
            CatalogOp::GetProfile => "profile fetch",
            CatalogOp::GroupMembers => "group membership fetch",
            CatalogOp::ListGroups => "group listing",
        };
        f.write_str(name)
    }
}

/// Common error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a response (connection, timeout, ...).
    #[error("{op} failed")]
    Request {
        op: CatalogOp,
        #[source]
        source: reqwest::Error,
    },
    /// The upstream answered with a non-404 error status.
    #[error("{op} failed: upstream returned {status}")]
    Status {
        op: CatalogOp,
        status: reqwest::StatusCode,
    },
    /// The response body could not be decoded as the expected shape.
    #[error("{op} returned an invalid payload")]
    Payload {
        op: CatalogOp,
        #[source]
        source: reqwest::Error,
    },
    #[error("{0}")]
    Other(String),
}

impl CatalogError {
    /// The operation this error originated from, if it carries one.
    pub fn op(&self) -> Option<CatalogOp> {
        match self {
            CatalogError::Request { op, .. }
            | CatalogError::Status { op, .. }
            | CatalogError::Payload { op, .. } => Some(*op),
            CatalogError::Other(_) => None,
        }
    }
}
