//! Search outcome model.

use serde::Serialize;

use crate::models::record::SpeciesRecord;

/// Outcome of a catalog search.
///
/// The two phases report totals with different meanings: an exact
/// identifier hit is a single record, while a substring scan reports the
/// full filtered match count even when only a bounded subset was
/// hydrated. The variants keep both meanings distinct.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum SearchResults {
    /// The query resolved as an exact species identifier.
    Exact(Box<SpeciesRecord>),
    /// Substring scan results. `items` is capped by the hydration bound;
    /// `total_count` counts every match, so it may exceed `items.len()`.
    Matches {
        items: Vec<SpeciesRecord>,
        total_count: u64,
    },
}

impl SearchResults {
    /// The empty result, returned for blank queries.
    pub fn empty() -> Self {
        SearchResults::Matches {
            items: Vec::new(),
            total_count: 0,
        }
    }

    pub fn total_count(&self) -> u64 {
        match self {
            SearchResults::Exact(_) => 1,
            SearchResults::Matches { total_count, .. } => *total_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }
}
