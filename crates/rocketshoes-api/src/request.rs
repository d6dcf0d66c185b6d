//! # Request Wrapper
//!
//! Turns a raw response into a decoded body or a [`FetchError`].
//!
//! ## Interpretation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  transport.send(descriptor)                                             │
//! │     │                                                                   │
//! │     ├── Err(Network | Timeout) ─────────────► that error                │
//! │     │                                                                   │
//! │     ▼  RawResponse { status, body }                                     │
//! │     ├── 404 ────────────────────────────────► NotFound                  │
//! │     ├── other non-2xx ──────────────────────► Status                    │
//! │     ├── blank body ─────────────────────────► EmptyBody                 │
//! │     ├── JSON doesn't match T ───────────────► Decode                    │
//! │     └── OK ─────────────────────────────────► Fetched { status, data }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is logged at `warn` here, once, so callers don't have to.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::descriptor::ResourceDescriptor;
use crate::error::{FetchError, FetchResult};
use crate::transport::Transport;

/// A successfully fetched and decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub status: u16,
    pub data: T,
}

/// Executes descriptors over a transport and decodes the result.
#[derive(Debug, Clone)]
pub struct Requester<T> {
    transport: T,
}

impl<T: Transport> Requester<T> {
    /// Wraps a transport.
    pub fn new(transport: T) -> Self {
        Requester { transport }
    }

    /// Returns the wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs the request described by `descriptor` and decodes the body as `B`.
    pub async fn request<B: DeserializeOwned>(
        &self,
        descriptor: &ResourceDescriptor,
    ) -> FetchResult<Fetched<B>> {
        let result = self.execute(descriptor).await;

        if let Err(ref e) = result {
            warn!(path = %descriptor.path, error = %e, "Fetch failed");
        }

        result
    }

    async fn execute<B: DeserializeOwned>(
        &self,
        descriptor: &ResourceDescriptor,
    ) -> FetchResult<Fetched<B>> {
        let path = &descriptor.path;
        let response = self.transport.send(descriptor).await?;

        if response.status == 404 {
            return Err(FetchError::NotFound { path: path.clone() });
        }
        if !response.is_success() {
            return Err(FetchError::Status {
                path: path.clone(),
                status: response.status,
            });
        }
        if response.body.trim().is_empty() {
            return Err(FetchError::EmptyBody { path: path.clone() });
        }

        let data = serde_json::from_str(&response.body).map_err(|e| FetchError::Decode {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        debug!(path = %path, status = response.status, "Fetch succeeded");
        Ok(Fetched {
            status: response.status,
            data,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
