//! # Geo Configuration
//!
//! Configuration for the address directory client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CHECKOUT_GEO_BASE_URL=https://api-adresse.data.gouv.fr             │
//! │     CHECKOUT_GEO_TIMEOUT_SECS=5                                        │
//! │     CHECKOUT_GEO_USER_AGENT=shop-backend/2.3                           │
//! │     CHECKOUT_GEO_DEFAULT_LIMIT=8                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, or                                                  │
//! │     ~/.config/checkout-guard/geo.toml (Linux)                          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # geo.toml
//! [directory]
//! base_url = "https://api-adresse.data.gouv.fr"
//! request_timeout_secs = 10
//! user_agent = "checkout-guard/0.1"
//!
//! [lookup]
//! default_limit = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{GeoError, GeoResult};

pub const ENV_BASE_URL: &str = "CHECKOUT_GEO_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CHECKOUT_GEO_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "CHECKOUT_GEO_USER_AGENT";
pub const ENV_DEFAULT_LIMIT: &str = "CHECKOUT_GEO_DEFAULT_LIMIT";

// =============================================================================
// Directory Settings
// =============================================================================

/// Where and how to reach the address directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySettings {
    /// Base URL of the directory; `search/` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Transport-level timeout for one request (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api-adresse.data.gouv.fr".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("checkout-guard/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for DirectorySettings {
    fn default() -> Self {
        DirectorySettings {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl DirectorySettings {
    /// The request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// =============================================================================
// Lookup Settings
// =============================================================================

/// Defaults applied by callers that do not pick their own limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupSettings {
    /// Number of suggestions requested by `search` callers.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_limit() -> usize {
    crate::resolver::DEFAULT_LIMIT
}

impl Default for LookupSettings {
    fn default() -> Self {
        LookupSettings {
            default_limit: default_limit(),
        }
    }
}

// =============================================================================
// Main Geo Configuration
// =============================================================================

/// Complete address directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoConfig {
    #[serde(default)]
    pub directory: DirectorySettings,

    #[serde(default)]
    pub lookup: LookupSettings,
}

impl GeoConfig {
    /// Reads `geo.toml`, applies `CHECKOUT_GEO_*` overrides, then validates.
    ///
    /// An explicit `config_path` wins over the platform config directory. A
    /// missing file is not an error: the defaults stand in for it.
    pub fn load(config_path: Option<PathBuf>) -> GeoResult<Self> {
        let mut config = match Self::resolve_path(config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Reading directory settings");
                toml::from_str(&std::fs::read_to_string(&path)?)?
            }
            Some(path) => {
                debug!(?path, "No geo.toml at path, directory defaults apply");
                Self::default()
            }
            None => {
                debug!("No platform config directory, directory defaults apply");
                Self::default()
            }
        };

        let overridden = config.apply_env_overrides();
        if overridden > 0 {
            debug!(overridden, "Directory settings overridden from environment");
        }
        config.validate()?;

        Ok(config)
    }

    /// Like [`load`](Self::load), but a broken file or bad override falls
    /// back to the built-in directory settings.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Unusable geo config, falling back to defaults");
            Self::default()
        })
    }

    /// Writes the settings as TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> GeoResult<()> {
        let path = Self::resolve_path(config_path).ok_or_else(|| {
            GeoError::ConfigSaveFailed("no geo.toml location on this platform".into())
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;

        info!(?path, base_url = %self.directory.base_url, "Directory settings saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> GeoResult<()> {
        let url = Url::parse(&self.directory.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GeoError::InvalidUrl(format!(
                "Directory URL must start with http:// or https://, got: {}",
                self.directory.base_url
            )));
        }

        if self.directory.request_timeout_secs == 0 {
            return Err(GeoError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.lookup.default_limit == 0 {
            return Err(GeoError::InvalidConfig(
                "default_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `CHECKOUT_GEO_*` overrides and returns how many took effect.
    ///
    /// Numeric values that do not parse are logged and skipped.
    fn apply_env_overrides(&mut self) -> usize {
        let mut applied = 0;

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            debug!(url = %url, "Overriding directory URL from environment");
            self.directory.base_url = url;
            applied += 1;
        }

        if let Ok(timeout) = std::env::var(ENV_TIMEOUT_SECS) {
            match timeout.parse::<u64>() {
                Ok(secs) => {
                    self.directory.request_timeout_secs = secs;
                    applied += 1;
                }
                Err(_) => warn!(value = %timeout, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }

        if let Ok(agent) = std::env::var(ENV_USER_AGENT) {
            self.directory.user_agent = agent;
            applied += 1;
        }

        if let Ok(limit) = std::env::var(ENV_DEFAULT_LIMIT) {
            match limit.parse::<usize>() {
                Ok(limit) => {
                    self.lookup.default_limit = limit;
                    applied += 1;
                }
                Err(_) => warn!(value = %limit, "Ignoring invalid {}", ENV_DEFAULT_LIMIT),
            }
        }

        applied
    }

    /// The explicit path, else `geo.toml` in the platform config directory.
    fn resolve_path(config_path: Option<PathBuf>) -> Option<PathBuf> {
        match config_path {
            Some(path) => {
                debug!(?path, "Using explicit geo config path");
                Some(path)
            }
            None => Self::default_config_path(),
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout-guard", "checkout-guard")
            .map(|dirs| dirs.config_dir().join("geo.toml"))
    }

    /// Returns the directory base URL.
    pub fn base_url(&self) -> &str {
        &self.directory.base_url
    }
}
