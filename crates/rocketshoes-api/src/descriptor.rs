//! # Resource Descriptors
//!
//! Pure builders for the (path, configuration) pair describing one fetch.
//!
//! ```text
//! products_get("/products", Some("3"))  →  GET /products/3   cache: no-store
//! products_get("/products", None)       →  GET /products     cache: no-store
//! stock_get("/stock", "3")              →  GET /stock/3      cache: no-store
//! ```
//!
//! `no-store` only tells the transport and any intermediary not to serve a
//! cached copy; nothing here caches.

use serde::{Deserialize, Serialize};

/// HTTP method of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}

/// Caching instruction for the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// Let the transport decide.
    #[default]
    Default,

    /// Always go to the origin (`Cache-Control: no-store`).
    NoStore,
}

/// Request configuration carried by a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    pub method: Method,
    pub cache: CachePolicy,
}

impl RequestConfig {
    /// `GET` with `no-store`, the configuration every catalog read uses.
    pub const fn uncached_get() -> Self {
        RequestConfig {
            method: Method::Get,
            cache: CachePolicy::NoStore,
        }
    }
}

/// One remote fetch: where and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub path: String,
    pub config: RequestConfig,
}

fn join_path(route: &str, parameter: Option<&str>) -> String {
    match parameter {
        Some(parameter) if !parameter.is_empty() => format!("{}/{}", route, parameter),
        _ => route.to_string(),
    }
}

/// Describes a product fetch; without a parameter it describes the listing.
pub fn products_get(route: &str, parameter: Option<&str>) -> ResourceDescriptor {
    ResourceDescriptor {
        path: join_path(route, parameter),
        config: RequestConfig::uncached_get(),
    }
}

/// Describes a stock fetch.
pub fn stock_get(route: &str, parameter: &str) -> ResourceDescriptor {
    ResourceDescriptor {
        path: join_path(route, Some(parameter)),
        config: RequestConfig::uncached_get(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_get_by_id() {
        let descriptor = products_get("/products", Some("3"));
        assert_eq!(descriptor.path, "/products/3");
        assert_eq!(descriptor.config.method, Method::Get);
        assert_eq!(descriptor.config.cache, CachePolicy::NoStore);
    }

    #[test]
    fn test_products_get_listing() {
        assert_eq!(products_get("/products", None).path, "/products");
        assert_eq!(products_get("/products", Some("")).path, "/products");
    }

    #[test]
    fn test_stock_get() {
        let descriptor = stock_get("/stock", "12");
        assert_eq!(descriptor.path, "/stock/12");
        assert_eq!(descriptor.config, RequestConfig::uncached_get());
    }

    #[test]
    fn test_config_wire_names() {
        let json = serde_json::to_value(RequestConfig::uncached_get()).unwrap();
        assert_eq!(json["method"], "GET");
        assert_eq!(json["cache"], "no-store");
    }
}
