//! # Address Directory
//!
//! The seam between the resolver and whatever answers address searches.
//!
//! ```text
//!   AddressResolver ──► dyn AddressDirectory ──┬──► HttpAddressDirectory ──► GET {base}/search/
//!                                              └──► test doubles
//! ```
//!
//! One call is one request: no retry, no cache. The HTTP implementation
//! carries the transport timeout from [`DirectorySettings`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use url::Url;

use crate::candidate::{ExternalAddressCandidate, FeatureCollection};
use crate::config::DirectorySettings;
use crate::error::{GeoError, GeoResult};

// =============================================================================
// Query
// =============================================================================

/// Granularity filter understood by the directory (`type=` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    Housenumber,
    Street,
    Locality,
    Municipality,
}

impl PlaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceKind::Housenumber => "housenumber",
            PlaceKind::Street => "street",
            PlaceKind::Locality => "locality",
            PlaceKind::Municipality => "municipality",
        }
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One address search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: usize,
    /// Restrict results to this postal code.
    pub postcode: Option<String>,
    /// Restrict results to this granularity.
    pub kind: Option<PlaceKind>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, limit: usize) -> Self {
        SearchQuery {
            text: text.into(),
            limit,
            postcode: None,
            kind: None,
        }
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    pub fn with_kind(mut self, kind: PlaceKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

// =============================================================================
// Directory Trait
// =============================================================================

/// Anything that can answer an address search.
#[async_trait]
pub trait AddressDirectory: Send + Sync {
    /// Runs one search and returns the candidates in relevance order.
    async fn query(&self, query: &SearchQuery) -> GeoResult<Vec<ExternalAddressCandidate>>;
}

// =============================================================================
// HTTP Directory
// =============================================================================

/// Directory backed by a BAN-style `search/` endpoint returning GeoJSON.
#[derive(Debug, Clone)]
pub struct HttpAddressDirectory {
    client: Client,
    search_url: Url,
}

impl HttpAddressDirectory {
    /// Builds the HTTP client from the directory settings.
    pub fn new(settings: &DirectorySettings) -> GeoResult<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| GeoError::InvalidConfig(e.to_string()))?;

        Ok(HttpAddressDirectory {
            client,
            search_url: search_url(&settings.base_url)?,
        })
    }

    /// The endpoint every query is sent to, without parameters.
    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    fn request_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &query.text);
            pairs.append_pair("limit", &query.limit.to_string());
            if let Some(postcode) = &query.postcode {
                pairs.append_pair("postcode", postcode);
            }
            if let Some(kind) = query.kind {
                pairs.append_pair("type", kind.as_str());
            }
        }
        url
    }
}

/// `{base}/search/`, tolerating a base with or without a trailing slash.
fn search_url(base_url: &str) -> GeoResult<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("search/")?)
}

#[async_trait]
impl AddressDirectory for HttpAddressDirectory {
    async fn query(&self, query: &SearchQuery) -> GeoResult<Vec<ExternalAddressCandidate>> {
        let url = self.request_url(query);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        debug!(status = %status, "Directory response");
        if !status.is_success() {
            return Err(GeoError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let collection: FeatureCollection = serde_json::from_str(&body)?;
        Ok(collection.into_candidates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(base_url: &str) -> HttpAddressDirectory {
        let settings = DirectorySettings {
            base_url: base_url.to_string(),
            ..DirectorySettings::default()
        };
        HttpAddressDirectory::new(&settings).unwrap()
    }

    #[test]
    fn test_search_url_joins_base() {
        assert_eq!(
            directory("https://api-adresse.data.gouv.fr").search_url().as_str(),
            "https://api-adresse.data.gouv.fr/search/"
        );
        assert_eq!(
            directory("http://localhost:7878/geo").search_url().as_str(),
            "http://localhost:7878/geo/search/"
        );
        assert_eq!(
            directory("http://localhost:7878/geo/").search_url().as_str(),
            "http://localhost:7878/geo/search/"
        );
    }

    #[test]
    fn test_request_url_parameters() {
        let dir = directory("http://localhost:7878");
        let query = SearchQuery::new("12 rue de la paix", 3)
            .with_postcode("75002")
            .with_kind(PlaceKind::Housenumber);

        let url = dir.request_url(&query);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "12 rue de la paix".to_string()),
                ("limit".to_string(), "3".to_string()),
                ("postcode".to_string(), "75002".to_string()),
                ("type".to_string(), "housenumber".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let settings = DirectorySettings {
            base_url: "::not a url".to_string(),
            ..DirectorySettings::default()
        };
        let err = HttpAddressDirectory::new(&settings).unwrap_err();
        assert!(matches!(err, GeoError::InvalidUrl(_)));
    }

    #[test]
    fn test_place_kind_wire_names() {
        assert_eq!(PlaceKind::Municipality.to_string(), "municipality");
        let kind: PlaceKind = serde_json::from_str("\"street\"").unwrap();
        assert_eq!(kind, PlaceKind::Street);
    }
}
