//! # Catalog Client
//!
//! Typed access to the two resources the cart needs: product bodies and
//! stock records. [`CatalogApi`] is the seam the cart store depends on,
//! so tests can swap in a fake catalog without a server.

use async_trait::async_trait;
use tracing::instrument;

use rocketshoes_core::{Product, ProductId, Stock};

use crate::config::ApiConfig;
use crate::descriptor::{products_get, stock_get};
use crate::error::{ConfigResult, FetchResult};
use crate::request::Requester;
use crate::transport::{HttpTransport, Transport};
use crate::{PRODUCTS_ROUTE, STOCK_ROUTE};

/// Read access to products and stock.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches one product body.
    async fn fetch_product(&self, product_id: ProductId) -> FetchResult<Product>;

    /// Fetches the stock record of one product.
    async fn fetch_stock(&self, product_id: ProductId) -> FetchResult<Stock>;

    /// Fetches the full product listing.
    async fn list_products(&self) -> FetchResult<Vec<Product>>;
}

/// [`CatalogApi`] backed by a [`Transport`].
#[derive(Debug, Clone)]
pub struct ApiClient<T = HttpTransport> {
    requester: Requester<T>,
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client over an existing transport.
    pub fn new(transport: T) -> Self {
        ApiClient {
            requester: Requester::new(transport),
        }
    }
}

impl ApiClient<HttpTransport> {
    /// Creates a reqwest-backed client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn from_config(config: &ApiConfig) -> ConfigResult<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

#[async_trait]
impl<T: Transport> CatalogApi for ApiClient<T> {
    #[instrument(skip(self))]
    async fn fetch_product(&self, product_id: ProductId) -> FetchResult<Product> {
        let id = product_id.to_string();
        let fetched = self
            .requester
            .request::<Product>(&products_get(PRODUCTS_ROUTE, Some(&id)))
            .await?;
        Ok(fetched.data)
    }

    #[instrument(skip(self))]
    async fn fetch_stock(&self, product_id: ProductId) -> FetchResult<Stock> {
        let id = product_id.to_string();
        let fetched = self
            .requester
            .request::<Stock>(&stock_get(STOCK_ROUTE, &id))
            .await?;
        Ok(fetched.data)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> FetchResult<Vec<Product>> {
        let fetched = self
            .requester
            .request::<Vec<Product>>(&products_get(PRODUCTS_ROUTE, None))
            .await?;
        Ok(fetched.data)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
