//! # checkout-geo: External Address Directory Client
//!
//! This crate matches customer-typed addresses against an external address
//! directory (BAN-style GeoJSON search API) to offer suggestions and decide
//! whether an address is known.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Address Resolution Flow                            │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                       AddressResolver                            │  │
//! │  │                                                                  │  │
//! │  │  search • search_by_postal_code • search_by_city • validate     │  │
//! │  │  lookup / validate_outcome (failures kept explicit)             │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │ Arc<dyn AddressDirectory>              │
//! │                               ▼                                         │
//! │  ┌────────────────────────────────────┐   ┌─────────────────────────┐  │
//! │  │       HttpAddressDirectory         │   │       GeoConfig         │  │
//! │  │                                    │◄──│                         │  │
//! │  │  GET {base}/search/?q=..&limit=..  │   │ defaults → geo.toml →   │  │
//! │  │  GeoJSON → ExternalAddressCandidate│   │ env → validate          │  │
//! │  └────────────────────────────────────┘   └─────────────────────────┘  │
//! │                                                                         │
//! │  One request per call. No retry, no cache, no debounce.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Directory URL, timeout and default limit
//! - [`error`] - Directory error types
//! - [`candidate`] - Candidates, coordinates and match verdicts
//! - [`directory`] - `AddressDirectory` seam and its HTTP implementation
//! - [`resolver`] - Query gating, outcomes and verdicts
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_geo::{AddressResolver, GeoConfig};
//!
//! let config = GeoConfig::load_or_default(None);
//! let resolver = AddressResolver::from_config(&config)?;
//!
//! let suggestions = resolver.search("12 rue de la paix", 5).await;
//! let verdict = resolver.validate("12 rue de la paix 75002 paris").await;
//! println!("valid: {} (score {})", verdict.valid, verdict.score);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod candidate;
pub mod config;
pub mod directory;
pub mod error;
pub mod resolver;

// =============================================================================
// Re-exports
// =============================================================================

pub use candidate::{
    AddressValidationVerdict, Coordinates, ExternalAddressCandidate, ACCEPTANCE_THRESHOLD,
};
pub use config::{DirectorySettings, GeoConfig, LookupSettings};
pub use directory::{AddressDirectory, HttpAddressDirectory, PlaceKind, SearchQuery};
pub use error::{GeoError, GeoResult};
pub use resolver::{AddressResolver, LookupOutcome, DEFAULT_LIMIT, MIN_CITY_CHARS, MIN_QUERY_CHARS};
