//! Catalog client for the upstream species API.
//!
//! Wraps the four remote read operations plus the group listing behind
//! [`ClientTrait`]. Upstream "resource absent" responses (HTTP 404) are
//! translated into `Ok(None)`; every other failure becomes a typed
//! [`CatalogError`] naming the operation that failed.

use std::fmt::Debug;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{self, HeaderMap};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogOp};
use crate::types::{
    GroupIndex,
    GroupMember,
    GroupMembership,
    NamedRef,
    RawProfile,
    RawSpecies,
    SpeciesIndex,
};

/// A client for the upstream species catalog.
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("catalog_url", &self.config.catalog_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        Url::parse(&config.catalog_url).map_err(|e| {
            CatalogError::Other(format!(
                "invalid catalog url '{}': {e}",
                config.catalog_url
            ))
        })?;
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        &self.config.catalog_url
    }

    fn endpoint(&self, path: impl AsRef<str>) -> String {
        format!(
            "{}/{}",
            self.config.catalog_url.trim_end_matches('/'),
            path.as_ref()
        )
    }

    /// GET a JSON payload. 404 is an error here; use [`Self::get_json_opt`]
    /// for operations where absence is part of the contract.
    async fn get_json<T: DeserializeOwned>(
        &self,
        op: CatalogOp,
        path: impl AsRef<str>,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        match self.get_json_opt(op, path, query).await? {
            Some(payload) => Ok(payload),
            None => Err(CatalogError::Status {
                op,
                status: StatusCode::NOT_FOUND,
            }),
        }
    }

    /// GET a JSON payload, mapping 404 to `Ok(None)`.
    async fn get_json_opt<T: DeserializeOwned>(
        &self,
        op: CatalogOp,
        path: impl AsRef<str>,
        query: &[(&str, String)],
    ) -> Result<Option<T>, CatalogError> {
        let url = self.endpoint(path);
        debug!(%op, url, "requesting catalog resource");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| CatalogError::Request { op, source })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%op, url, "catalog resource absent");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CatalogError::Status { op, status });
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|source| CatalogError::Payload { op, source })
    }
}

// ---------------------------------------------------------------------------
// Catalog trait
// ---------------------------------------------------------------------------

/// The complete catalog interface.
///
/// This trait enables alternate implementations: HTTP calls to the real
/// upstream via [`CatalogClient`], or canned responses in SDK tests.
/// Each call issues exactly one outbound request; there is no client-side
/// retry.
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// Fetch one page of the species index. A list request is never
    /// "not found"; any non-success status is an error.
    async fn list_species(&self, limit: u32, offset: u64) -> Result<SpeciesIndex, CatalogError>;

    /// Fetch a single species by name. The name is lowercased before the
    /// call. Returns `Ok(None)` when the upstream reports absence.
    async fn get_species(
        &self,
        name: impl AsRef<str> + Send + Sync,
    ) -> Result<Option<RawSpecies>, CatalogError>;

    /// Fetch the descriptive profile of a species by id. Same absence
    /// contract as [`Self::get_species`].
    async fn get_profile(&self, id: u64) -> Result<Option<RawProfile>, CatalogError>;

    /// Fetch the full, unpaginated membership of a group. The key is
    /// lowercased before the call.
    async fn group_members(
        &self,
        key: impl AsRef<str> + Send + Sync,
    ) -> Result<Option<Vec<GroupMember>>, CatalogError>;

    /// Fetch all groups.
    async fn list_groups(&self) -> Result<Vec<NamedRef>, CatalogError>;
}

impl ClientTrait for CatalogClient {
    #[instrument(skip(self))]
    async fn list_species(&self, limit: u32, offset: u64) -> Result<SpeciesIndex, CatalogError> {
        let index: SpeciesIndex = self
            .get_json(CatalogOp::ListSpecies, "species", &[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ])
            .await?;

        debug!(
            count = index.count,
            on_page = index.results.len(),
            "received species index page"
        );
        Ok(index)
    }

    #[instrument(skip_all, fields(name = %name.as_ref()))]
    async fn get_species(
        &self,
        name: impl AsRef<str> + Send + Sync,
    ) -> Result<Option<RawSpecies>, CatalogError> {
        let name = name.as_ref().to_lowercase();
        self.get_json_opt(CatalogOp::GetSpecies, format!("species/{name}"), &[])
            .await
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, id: u64) -> Result<Option<RawProfile>, CatalogError> {
        self.get_json_opt(CatalogOp::GetProfile, format!("species/{id}/profile"), &[])
            .await
    }

    #[instrument(skip_all, fields(key = %key.as_ref()))]
    async fn group_members(
        &self,
        key: impl AsRef<str> + Send + Sync,
    ) -> Result<Option<Vec<GroupMember>>, CatalogError> {
        let key = key.as_ref().to_lowercase();
        let membership: Option<GroupMembership> = self
            .get_json_opt(CatalogOp::GroupMembers, format!("group/{key}"), &[])
            .await?;
        Ok(membership.map(|membership| membership.members))
    }

    #[instrument(skip_all)]
    async fn list_groups(&self) -> Result<Vec<NamedRef>, CatalogError> {
        let index: GroupIndex = self.get_json(CatalogOp::ListGroups, "group", &[]).await?;
        Ok(index.results)
    }
}

// ---------------------------------------------------------------------------
// HTTP client builder
// ---------------------------------------------------------------------------

/// Build the HTTP client used for all catalog requests.
fn build_http_client(config: &CatalogConfig) -> Result<reqwest::Client, CatalogError> {
    let mut headers = HeaderMap::new();

    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key).map_err(
                |e: reqwest::header::InvalidHeaderName| CatalogError::Other(e.to_string()),
            )?,
            header::HeaderValue::from_str(value).map_err(
                |e: reqwest::header::InvalidHeaderValue| CatalogError::Other(e.to_string()),
            )?,
        );
    }

    debug!(
        catalog_url = %config.catalog_url,
        extra_headers = config.extra_headers.len(),
        "building catalog HTTP client"
    );

    let client_builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(60));

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent)
    } else {
        client_builder
    };

    client_builder
        .build()
        .map_err(|e| CatalogError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use httpmock::MockServer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::new(CatalogConfig::new(server.base_url())).unwrap()
    }

    fn species_json() -> serde_json::Value {
        json!({
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "groups": [{"slot": 1, "group": {"name": "electric"}}],
            "stats": [
                {"base_value": 35, "stat": {"name": "hp"}},
                {"base_value": 50, "stat": {"name": "special-attack"}}
            ],
            "abilities": [{"is_hidden": false, "ability": {"name": "static"}}],
            "images": {
                "front_default": "https://img.test/pikachu.png",
                "artwork": "https://img.test/pikachu-artwork.png"
            }
        })
    }

    #[tokio::test]
    async fn list_species_passes_limit_and_offset() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/species")
                .query_param("limit", "20")
                .query_param("offset", "40");
            then.status(200).json_body(json!({
                "count": 1302,
                "results": [
                    {"name": "bulbasaur", "url": "https://catalog.test/species/1"},
                    {"name": "ivysaur", "url": "https://catalog.test/species/2"}
                ]
            }));
        });

        let index = client_for(&server).list_species(20, 40).await.unwrap();
        assert_eq!(index.count, 1302);
        assert_eq!(index.results.len(), 2);
        assert_eq!(index.results[0].name, "bulbasaur");
        mock.assert();
    }

    #[tokio::test]
    async fn list_species_never_absent() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/species");
            then.status(404);
        });

        let result = client_for(&server).list_species(20, 0).await;
        assert!(
            matches!(result, Err(CatalogError::Status {
                op: CatalogOp::ListSpecies,
                status
            }) if status == StatusCode::NOT_FOUND),
            "expected a status error, found: {result:?}"
        );
    }

    #[tokio::test]
    async fn get_species_parses_payload() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/species/pikachu");
            then.status(200).json_body(species_json());
        });

        let species = client_for(&server)
            .get_species("pikachu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(species.id, 25);
        assert_eq!(species.groups[0].group.name, "electric");
        assert_eq!(species.stats[1].stat.name, "special-attack");
        mock.assert();
    }

    #[tokio::test]
    async fn get_species_lowercases_name() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/species/pikachu");
            then.status(200).json_body(species_json());
        });

        let species = client_for(&server).get_species("PIKACHU").await.unwrap();
        assert!(species.is_some());
        mock.assert();
    }

    #[tokio::test]
    async fn get_species_maps_404_to_absence() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/species/nonexistent-xyz");
            then.status(404)
                .json_body(json!({"detail": "species not found"}));
        });

        let species = client_for(&server).get_species("nonexistent-xyz").await;
        assert!(
            matches!(species, Ok(None)),
            "expected Ok(None), found: {species:?}"
        );
        mock.assert();
    }

    #[tokio::test]
    async fn get_species_propagates_server_errors() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/species/pikachu");
            then.status(502);
        });

        let result = client_for(&server).get_species("pikachu").await;
        let Err(err) = result else {
            panic!("expected an error, found: {result:?}");
        };
        assert_eq!(err.op(), Some(CatalogOp::GetSpecies));
        assert!(err.to_string().contains("species fetch"));
    }

    #[tokio::test]
    async fn get_species_rejects_invalid_payload() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/species/pikachu");
            then.status(200)
                .header("content-type", "application/json")
                .body("[\"not\", \"a\", \"species\"]");
        });

        let result = client_for(&server).get_species("pikachu").await;
        assert!(
            matches!(result, Err(CatalogError::Payload {
                op: CatalogOp::GetSpecies,
                ..
            })),
            "expected a payload error, found: {result:?}"
        );
    }

    #[tokio::test]
    async fn get_profile_parses_payload() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/species/25/profile");
            then.status(200).json_body(json!({
                "descriptions": [
                    {"text": "Stores electricity\nin its cheeks.", "language": {"name": "en"}}
                ],
                "genera": [{"genus": "Mouse", "language": {"name": "en"}}],
                "color": {"name": "yellow"},
                "popularity": 190,
                "friendliness": 50
            }));
        });

        let profile = client_for(&server).get_profile(25).await.unwrap().unwrap();
        assert_eq!(profile.color, Some(NamedRef::new("yellow")));
        assert_eq!(profile.popularity, Some(190));
        mock.assert();
    }

    #[tokio::test]
    async fn group_members_lowercases_key_and_unwraps_membership() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/group/flying");
            then.status(200).json_body(json!({
                "members": [
                    {"species": {"name": "pidgey"}},
                    {"species": {"name": "zubat"}}
                ]
            }));
        });

        let members = client_for(&server)
            .group_members("Flying")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].species.name, "zubat");
        mock.assert();
    }

    #[tokio::test]
    async fn group_members_maps_404_to_absence() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/group/unknown-group");
            then.status(404);
        });

        let members = client_for(&server).group_members("unknown-group").await;
        assert!(matches!(members, Ok(None)));
    }

    #[tokio::test]
    async fn list_groups_returns_all_entries() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/group");
            then.status(200).json_body(json!({
                "results": [
                    {"name": "grass"},
                    {"name": "electric"},
                    {"name": "unknown"}
                ]
            }));
        });

        let groups = client_for(&server).list_groups().await.unwrap();
        // The client reports everything; non-display filtering is SDK policy.
        assert_eq!(groups.len(), 3);
        mock.assert();
    }

    #[tokio::test]
    async fn extra_headers_set_on_all_requests() {
        let mut extra_headers: BTreeMap<String, String> = BTreeMap::new();
        extra_headers.insert("x-invocation-source".to_string(), "tests".to_string());

        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/species").header("x-invocation-source", "tests");
            then.status(200).json_body(json!({"count": 0, "results": []}));
        });

        let config = CatalogConfig {
            extra_headers,
            ..CatalogConfig::new(server.base_url())
        };
        let client = CatalogClient::new(config).unwrap();
        client.list_species(20, 0).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn user_agent_set_on_all_requests() {
        let expected_agent = "bestiary-tests/0.0";

        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/species").header("user-agent", expected_agent);
            then.status(200).json_body(json!({"count": 0, "results": []}));
        });

        let config = CatalogConfig {
            user_agent: Some(expected_agent.to_owned()),
            ..CatalogConfig::new(server.base_url())
        };
        let client = CatalogClient::new(config).unwrap();
        client.list_species(20, 0).await.unwrap();
        mock.assert();
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = CatalogClient::new(CatalogConfig::new("not a url"));
        assert!(
            matches!(result, Err(CatalogError::Other(_))),
            "expected construction to fail"
        );
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_tolerated() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/species/pikachu");
            then.status(200).json_body(species_json());
        });

        let config = CatalogConfig::new(format!("{}/", server.base_url()));
        let client = CatalogClient::new(config).unwrap();
        let species = client.get_species("pikachu").await.unwrap();
        assert!(species.is_some());
        mock.assert();
    }
}
