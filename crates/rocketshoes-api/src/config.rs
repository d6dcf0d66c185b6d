//! # API Configuration
//!
//! Settings for reaching the storefront API. Loaded as the `[api]` section
//! of the storefront config file.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3333"
//! # request_timeout_secs = 10   # unset: requests may wait indefinitely
//! user_agent = "rocketshoes-storefront/0.1"
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::DEFAULT_BASE_URL;

/// API client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address every resource path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. `None` keeps the reqwest default of no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("rocketshoes-storefront/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Creates a config pointing at `base_url`, other settings default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.parsed_base_url()?;

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "user_agent must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Parses the base URL, normalised to end with `/` so joins append.
    pub fn parsed_base_url(&self) -> ConfigResult<Url> {
        let mut url = Url::parse(&self.base_url)?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    /// Returns the request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
