//! # Address Resolver
//!
//! Approximate matching of customer-typed addresses against the directory.
//!
//! ## Outcomes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lookup(query)                                                          │
//! │                                                                         │
//! │   trimmed text < 3 chars ──────────────────────────► Skipped            │
//! │   directory error ─────────────────────────────────► Failed(GeoError)   │
//! │   zero candidates ─────────────────────────────────► NoMatch            │
//! │   candidates ──────────────────────────────────────► Found(Vec)         │
//! │                                                                         │
//! │  search / search_by_* / validate collapse Skipped, NoMatch and Failed   │
//! │  into "no suggestions". lookup / validate_outcome keep them apart.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use checkout_core::sanitize::sanitize_numeric;
use checkout_core::validation::check_postal_code;
use tracing::{debug, warn};

use crate::candidate::{AddressValidationVerdict, ExternalAddressCandidate};
use crate::config::GeoConfig;
use crate::directory::{AddressDirectory, HttpAddressDirectory, PlaceKind, SearchQuery};
use crate::error::{GeoError, GeoResult};

/// Shortest query (trimmed, in characters) worth sending to the directory.
pub const MIN_QUERY_CHARS: usize = 3;

/// Shortest city name accepted by [`AddressResolver::search_by_city`].
pub const MIN_CITY_CHARS: usize = 2;

/// Limit used by callers without a preference.
pub const DEFAULT_LIMIT: usize = 5;

// =============================================================================
// Lookup Outcome
// =============================================================================

/// Result of one directory lookup.
#[derive(Debug)]
pub enum LookupOutcome {
    /// The query was rejected locally; the directory was not called.
    Skipped,
    /// The directory answered with no candidates.
    NoMatch,
    /// The directory answered with at least one candidate.
    Found(Vec<ExternalAddressCandidate>),
    /// The directory could not be reached or answered garbage.
    Failed(GeoError),
}

impl LookupOutcome {
    /// Candidates if found, otherwise empty.
    pub fn into_candidates(self) -> Vec<ExternalAddressCandidate> {
        match self {
            LookupOutcome::Found(candidates) => candidates,
            _ => Vec::new(),
        }
    }

    /// Returns true if the directory was actually asked.
    pub fn reached_directory(&self) -> bool {
        !matches!(self, LookupOutcome::Skipped)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LookupOutcome::Failed(_))
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Searches and validates addresses through an [`AddressDirectory`].
///
/// Cheap to clone; clones share the directory.
#[derive(Clone)]
pub struct AddressResolver {
    directory: Arc<dyn AddressDirectory>,
}

impl AddressResolver {
    pub fn new(directory: Arc<dyn AddressDirectory>) -> Self {
        AddressResolver { directory }
    }

    /// Resolver over the HTTP directory described by `config`.
    pub fn from_config(config: &GeoConfig) -> GeoResult<Self> {
        let directory = HttpAddressDirectory::new(&config.directory)?;
        Ok(Self::new(Arc::new(directory)))
    }

    /// Runs one query, keeping failures distinct from empty answers.
    pub async fn lookup(&self, query: &SearchQuery) -> LookupOutcome {
        let query_len = query.text.trim().chars().count();
        if query_len < MIN_QUERY_CHARS {
            debug!(query_len, "Query too short, directory not called");
            return LookupOutcome::Skipped;
        }

        match self.directory.query(query).await {
            Ok(candidates) if candidates.is_empty() => {
                debug!(query_len, limit = query.limit, "No directory match");
                LookupOutcome::NoMatch
            }
            Ok(candidates) => {
                debug!(
                    query_len,
                    limit = query.limit,
                    count = candidates.len(),
                    "Directory candidates"
                );
                LookupOutcome::Found(candidates)
            }
            Err(e) => {
                warn!(query_len, error = %e, "Address lookup failed");
                LookupOutcome::Failed(e)
            }
        }
    }

    /// Up to `limit` suggestions for free text. Empty on short input or failure.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<ExternalAddressCandidate> {
        self.lookup(&SearchQuery::new(query.trim(), limit.max(1)))
            .await
            .into_candidates()
    }

    /// Suggestions inside one postal code. Codes that fail the postal code
    /// rule are never sent.
    pub async fn search_by_postal_code(
        &self,
        postal_code: &str,
        limit: usize,
    ) -> Vec<ExternalAddressCandidate> {
        if let Err(e) = check_postal_code(postal_code) {
            debug!(error = %e, "Postal code rejected, directory not called");
            return Vec::new();
        }

        let code = sanitize_numeric(postal_code);
        let query = SearchQuery::new(code.clone(), limit.max(1)).with_postcode(code);
        self.lookup(&query).await.into_candidates()
    }

    /// Municipalities matching a city name.
    ///
    /// Names under [`MIN_CITY_CHARS`] are rejected; the general
    /// [`MIN_QUERY_CHARS`] gate still applies afterwards.
    pub async fn search_by_city(&self, city: &str, limit: usize) -> Vec<ExternalAddressCandidate> {
        let city = city.trim();
        if city.chars().count() < MIN_CITY_CHARS {
            debug!("City name too short, directory not called");
            return Vec::new();
        }

        let query = SearchQuery::new(city, limit.max(1)).with_kind(PlaceKind::Municipality);
        self.lookup(&query).await.into_candidates()
    }

    /// Verdict from the single best candidate. Lookup failures yield an
    /// invalid verdict.
    pub async fn validate(&self, address: &str) -> AddressValidationVerdict {
        self.validate_outcome(address)
            .await
            .unwrap_or_else(|_| AddressValidationVerdict::no_match())
    }

    /// Like [`validate`](Self::validate), but a lookup failure is an error
    /// instead of an invalid verdict.
    pub async fn validate_outcome(&self, address: &str) -> GeoResult<AddressValidationVerdict> {
        let query = SearchQuery::new(address.trim(), 1);
        match self.lookup(&query).await {
            LookupOutcome::Failed(e) => Err(e),
            outcome => {
                let best = outcome.into_candidates().into_iter().next();
                let verdict = AddressValidationVerdict::from_best(best);
                debug!(valid = verdict.valid, score = verdict.score, "Address verdict");
                Ok(verdict)
            }
        }
    }
}
