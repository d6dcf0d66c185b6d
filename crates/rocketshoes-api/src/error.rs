//! # Fetch Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Fetch Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Transport     │  │    Response     │  │      Body               │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Network        │  │  NotFound (404) │  │  EmptyBody              │ │
//! │  │  Timeout        │  │  Status (other) │  │  Decode                 │ │
//! │  │  InvalidUrl     │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for fetches.
pub type FetchResult<T> = Result<T, FetchError>;

/// Why a fetch produced no usable body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API answered 404.
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    /// The API answered with any other non-2xx status.
    #[error("Unexpected status {status} for {path}")]
    Status { path: String, status: u16 },

    /// The request never got a response (refused, reset, DNS...).
    #[error("Network error for {path}: {reason}")]
    Network { path: String, reason: String },

    /// The configured request timeout elapsed.
    #[error("Request to {path} timed out")]
    Timeout { path: String },

    /// 2xx with no body.
    #[error("Empty response body for {path}")]
    EmptyBody { path: String },

    /// 2xx with a body that isn't the expected JSON shape.
    #[error("Failed to decode response for {path}: {reason}")]
    Decode { path: String, reason: String },

    /// The request URL could not be built.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// The resource path the failed request targeted, when known.
    pub fn path(&self) -> Option<&str> {
        match self {
            FetchError::NotFound { path }
            | FetchError::Status { path, .. }
            | FetchError::Network { path, .. }
            | FetchError::Timeout { path }
            | FetchError::EmptyBody { path }
            | FetchError::Decode { path, .. } => Some(path),
            FetchError::InvalidUrl(_) => None,
        }
    }

    /// True when the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }

    /// True when no HTTP response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Network { .. } | FetchError::Timeout { .. } | FetchError::InvalidUrl(_)
        )
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Result type alias for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid API configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Base URL doesn't parse or isn't http(s).
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Any other invalid setting.
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for ConfigError {
    fn from(err: reqwest::Error) -> Self {
        ConfigError::ClientBuild(err.to_string())
    }
}
