//! # rocketshoes-api: Catalog Client for RocketShoes
//!
//! This crate fetches products and stock records from the storefront API.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fetch Pipeline                                   │
//! │                                                                         │
//! │  CartStore                                                              │
//! │     │ catalog.fetch_stock(3)                                            │
//! │     ▼                                                                   │
//! │  ┌────────────────┐   stock_get("/stock", "3")                          │
//! │  │   ApiClient    │──────────────────────────► ResourceDescriptor       │
//! │  │ (CatalogApi)   │                             { path: "/stock/3",     │
//! │  └───────┬────────┘                               GET, no-store }       │
//! │          ▼                                                              │
//! │  ┌────────────────┐   status + body checks, JSON decode                 │
//! │  │   Requester    │──────────────────────────► Result<Fetched<T>,       │
//! │  └───────┬────────┘                                   FetchError>       │
//! │          ▼                                                              │
//! │  ┌────────────────┐                                                     │
//! │  │ HttpTransport  │  reqwest ─► http://localhost:3333/stock/3           │
//! │  └────────────────┘                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Reporting
//! Every failed fetch comes back as a [`FetchError`] value that says which
//! of "not found", "bad status", "network", "timeout", "empty body" or
//! "undecodable body" happened. Nothing is swallowed; callers decide.
//!
//! ## Module Organization
//!
//! - [`config`] - Base URL, timeout and user agent
//! - [`descriptor`] - Resource descriptor builders
//! - [`transport`] - The HTTP seam and its reqwest implementation
//! - [`request`] - Status/body interpretation and decoding
//! - [`client`] - Typed product/stock client
//! - [`error`] - Fetch and configuration errors

pub mod client;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod request;
pub mod transport;

pub use client::{ApiClient, CatalogApi};
pub use config::ApiConfig;
pub use descriptor::{products_get, stock_get, CachePolicy, Method, RequestConfig, ResourceDescriptor};
pub use error::{ConfigError, ConfigResult, FetchError, FetchResult};
pub use request::{Fetched, Requester};
pub use transport::{HttpTransport, RawResponse, Transport};

/// Base address of the storefront API in development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Route serving product bodies.
pub const PRODUCTS_ROUTE: &str = "/products";

/// Route serving stock records.
pub const STOCK_ROUTE: &str = "/stock";
