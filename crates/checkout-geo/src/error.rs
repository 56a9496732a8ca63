//! # Geo Error Types
//!
//! Error types for address directory operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Geo Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Status                 │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  Decode                 │ │
//! │  │  ConfigLoad/Save│  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The convenience surfaces of the resolver (`search`, `validate`) swallow
//! these errors; `lookup` and `validate_outcome` hand them to the caller.

use thiserror::Error;

/// Result type alias for directory operations.
pub type GeoResult<T> = Result<T, GeoError>;

/// Error type covering every address directory failure.
#[derive(Debug, Error)]
pub enum GeoError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid directory configuration.
    #[error("Invalid geo configuration: {0}")]
    InvalidConfig(String),

    /// Invalid directory URL.
    #[error("Invalid directory URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request could not be sent or the connection dropped.
    #[error("Directory request failed: {0}")]
    Transport(String),

    /// The transport-level timeout elapsed.
    #[error("Directory request timed out")]
    Timeout,

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The directory answered with a non-success status.
    #[error("Directory returned HTTP {status}")]
    Status { status: u16 },

    /// The response body is not the expected GeoJSON.
    #[error("Failed to decode directory response: {0}")]
    Decode(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for GeoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeoError::Timeout
        } else if err.is_decode() {
            GeoError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            GeoError::Status {
                status: status.as_u16(),
            }
        } else {
            GeoError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GeoError {
    fn from(err: serde_json::Error) -> Self {
        GeoError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for GeoError {
    fn from(err: url::ParseError) -> Self {
        GeoError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for GeoError {
    fn from(err: std::io::Error) -> Self {
        GeoError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for GeoError {
    fn from(err: toml::de::Error) -> Self {
        GeoError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for GeoError {
    fn from(err: toml::ser::Error) -> Self {
        GeoError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl GeoError {
    /// Returns true if the same request might succeed later.
    ///
    /// The resolver never retries on its own; this is for callers that do.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeoError::Transport(_) | GeoError::Timeout => true,
            GeoError::Status { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GeoError::InvalidConfig(_)
                | GeoError::InvalidUrl(_)
                | GeoError::ConfigLoadFailed(_)
                | GeoError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GeoError::Transport("connection refused".into()).is_retryable());
        assert!(GeoError::Timeout.is_retryable());
        assert!(GeoError::Status { status: 503 }.is_retryable());
        assert!(GeoError::Status { status: 429 }.is_retryable());

        assert!(!GeoError::Status { status: 400 }.is_retryable());
        assert!(!GeoError::Decode("eof".into()).is_retryable());
        assert!(!GeoError::InvalidConfig("bad".into()).is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(GeoError::InvalidUrl("x".into()).is_config_error());
        assert!(!GeoError::Timeout.is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = GeoError::Status { status: 502 };
        assert_eq!(err.to_string(), "Directory returned HTTP 502");
    }
}
