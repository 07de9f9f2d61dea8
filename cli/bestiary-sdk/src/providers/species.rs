//! Aggregation service over the species catalog.
//!
//! [`SpeciesService`] composes the catalog client operations into the views
//! the application needs: detail hydration, a paginated listing, two-phase
//! search, client-side group pagination and a display-ready group listing.
//!
//! Fan-out hydration preserves the upstream ordering and fails as a whole
//! on the first error (join-all semantics); the number of simultaneous
//! upstream requests is capped by [`ServiceConfig::fanout_concurrency`].

use bestiary_catalog::types::RawProfile;
use bestiary_catalog::{CatalogError, ClientTrait};
use futures::{stream, StreamExt, TryStreamExt};
use tracing::{debug, instrument};

use crate::models::group::GroupInfo;
use crate::models::page::{offset_for, Page};
use crate::models::record::SpeciesRecord;
use crate::models::search::SearchResults;

/// Group keys excluded from display listings.
const NON_DISPLAY_GROUPS: [&str; 2] = ["unknown", "shadow"];

/// Tunables of the aggregation service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Hard ceiling on caller-supplied page sizes.
    pub max_limit: u32,
    /// How many index entries the substring scan considers.
    pub scan_bound: u32,
    /// How many scan matches are hydrated into full records.
    pub hydrate_bound: usize,
    /// Cap on simultaneous hydration requests.
    pub fanout_concurrency: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            max_limit: 100,
            scan_bound: 1000,
            hydrate_bound: 20,
            fanout_concurrency: 16,
        }
    }
}

/// The aggregation service. Generic over the catalog client so tests can
/// substitute canned responses.
#[derive(Debug)]
pub struct SpeciesService<C> {
    client: C,
    config: ServiceConfig,
}

impl<C: ClientTrait> SpeciesService<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, ServiceConfig::default())
    }

    pub fn with_config(client: C, config: ServiceConfig) -> Self {
        SpeciesService { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch and normalize one species. Returns `Ok(None)` when the
    /// species does not exist; the profile is attached best-effort.
    #[instrument(skip_all, fields(name = %name.as_ref()))]
    pub async fn get_details(
        &self,
        name: impl AsRef<str>,
    ) -> Result<Option<SpeciesRecord>, CatalogError> {
        let Some(species) = self.client.get_species(name.as_ref()).await? else {
            return Ok(None);
        };
        let profile = self.attach_profile(species.id).await;
        Ok(Some(SpeciesRecord::from_raw(species, profile)))
    }

    /// Best-effort profile attach: absence and upstream failure alike
    /// yield `None` and never escalate to the caller.
    async fn attach_profile(&self, id: u64) -> Option<RawProfile> {
        match self.client.get_profile(id).await {
            Ok(profile) => profile,
            Err(err) => {
                debug!(id, %err, "profile fetch failed, continuing without");
                None
            },
        }
    }

    /// One page of the full species listing.
    ///
    /// The returned items are index-aligned with the upstream page: a
    /// species whose hydration came back absent is kept as `None` at its
    /// position rather than dropped.
    #[instrument(skip(self))]
    pub async fn get_list_page(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Page<Option<SpeciesRecord>>, CatalogError> {
        let page = page.max(1);
        let limit = limit.clamp(1, self.config.max_limit);
        let offset = offset_for(page, limit);

        let index = self.client.list_species(limit, offset).await?;
        let names = index
            .results
            .into_iter()
            .map(|summary| summary.name)
            .collect();
        let items = self.hydrate_ordered(names).await?;

        Ok(Page::new(items, index.count, page, limit))
    }

    /// Two-phase search: an exact identifier lookup first, then a bounded
    /// substring scan of the index.
    ///
    /// A blank query short-circuits to the empty result without any
    /// network call.
    #[instrument(skip_all, fields(query = %query.as_ref()))]
    pub async fn search(&self, query: impl AsRef<str>) -> Result<SearchResults, CatalogError> {
        let query = query.as_ref().trim();
        if query.is_empty() {
            return Ok(SearchResults::empty());
        }

        if let Some(record) = self.get_details(query).await? {
            debug!("query resolved as exact identifier");
            return Ok(SearchResults::Exact(Box::new(record)));
        }

        let index = self.client.list_species(self.config.scan_bound, 0).await?;
        let needle = query.to_lowercase();
        let matched: Vec<String> = index
            .results
            .into_iter()
            .filter(|summary| summary.name.to_lowercase().contains(&needle))
            .map(|summary| summary.name)
            .collect();
        let total_count = matched.len() as u64;
        debug!(total_count, "substring scan complete");

        let to_hydrate: Vec<String> = matched
            .into_iter()
            .take(self.config.hydrate_bound)
            .collect();
        let items = self
            .hydrate_ordered(to_hydrate)
            .await?
            .into_iter()
            .flatten()
            .collect();

        Ok(SearchResults::Matches { items, total_count })
    }

    /// One page of a group's membership, paginated client-side because
    /// the upstream returns the membership unpaginated in full.
    ///
    /// Returns `Ok(None)` when the group does not exist. Absent
    /// hydrations are dropped from the items; `total_count` always
    /// reflects the full membership.
    #[instrument(skip(self, key), fields(key = %key.as_ref()))]
    pub async fn get_group_page(
        &self,
        key: impl AsRef<str>,
        page: u32,
        limit: u32,
    ) -> Result<Option<Page<SpeciesRecord>>, CatalogError> {
        let Some(members) = self.client.group_members(key.as_ref()).await? else {
            return Ok(None);
        };

        let page = page.max(1);
        let limit = limit.clamp(1, self.config.max_limit);
        let offset = offset_for(page, limit);
        let total_count = members.len() as u64;

        let names: Vec<String> = members
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|member| member.species.name)
            .collect();
        let items = self
            .hydrate_ordered(names)
            .await?
            .into_iter()
            .flatten()
            .collect();

        Ok(Some(Page::new(items, total_count, page, limit)))
    }

    /// All displayable groups, with the sentinel non-display keys
    /// excluded.
    #[instrument(skip_all)]
    pub async fn list_groups(&self) -> Result<Vec<GroupInfo>, CatalogError> {
        let groups = self.client.list_groups().await?;
        Ok(groups
            .into_iter()
            .filter(|group| !NON_DISPLAY_GROUPS.contains(&group.name.as_str()))
            .map(|group| GroupInfo::from_key(group.name))
            .collect())
    }

    /// Hydrate a sequence of names concurrently, preserving input order.
    /// The first failed hydration fails the whole batch.
    async fn hydrate_ordered(
        &self,
        names: Vec<String>,
    ) -> Result<Vec<Option<SpeciesRecord>>, CatalogError> {
        let concurrency = self.config.fanout_concurrency.max(1);
        stream::iter(names.into_iter().map(|name| self.get_details(name)))
            .buffered(concurrency)
            .try_collect()
            .await
    }
}
