//! # HTTP Transport
//!
//! The seam between the request wrapper and the network. A transport
//! performs exactly one request per call: no retries, no cancellation.
//!
//! ## Status Handling
//! The transport reports whatever status came back; deciding what a 404 or
//! a 500 means is the [`Requester`](crate::request::Requester)'s job.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CACHE_CONTROL};
use tracing::{debug, trace};
use url::Url;

use crate::config::ApiConfig;
use crate::descriptor::{CachePolicy, Method, ResourceDescriptor};
use crate::error::{ConfigResult, FetchError, FetchResult};

/// A response as received: status and raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        RawResponse {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one described request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the request. Errors only when no response was received.
    async fn send(&self, descriptor: &ResourceDescriptor) -> FetchResult<RawResponse>;
}

// =============================================================================
// reqwest Transport
// =============================================================================

/// [`Transport`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Builds the HTTP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the client fails to build.
    pub fn new(config: &ApiConfig) -> ConfigResult<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(HttpTransport {
            client: builder.build()?,
            base_url: config.parsed_base_url()?,
        })
    }

    /// Resolves a resource path against the base URL.
    pub fn url_for(&self, path: &str) -> FetchResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, descriptor: &ResourceDescriptor) -> FetchResult<RawResponse> {
        let url = self.url_for(&descriptor.path)?;
        let path = descriptor.path.clone();

        let method = match descriptor.config.method {
            Method::Get => reqwest::Method::GET,
        };

        let mut request = self.client.request(method, url.clone());
        if descriptor.config.cache == CachePolicy::NoStore {
            request = request.header(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        }

        debug!(method = descriptor.config.method.as_str(), %url, "Sending request");

        let response = request
            .send()
            .await
            .map_err(|e| classify(path.clone(), e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(path, e))?;

        trace!(status, bytes = body.len(), "Response received");
        Ok(RawResponse { status, body })
    }
}

fn classify(path: String, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout { path }
    } else {
        FetchError::Network {
            path,
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
