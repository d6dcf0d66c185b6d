//! # Product Commands
//!
//! The home page listing: every product, priced for display and annotated
//! with how many units are already in the cart (the "N" badge on each
//! "ADICIONAR AO CARRINHO" button).

use rocketshoes_api::CatalogApi;
use rocketshoes_core::{Product, ProductId};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::CartStore;

/// A product card on the home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub id: ProductId,
    pub title: String,
    pub price: f64,

    /// Price formatted for display (e.g. "R$ 139,90").
    pub price_formatted: String,
    pub image: String,

    /// Units of this product already in the cart.
    pub amount_in_cart: i32,
}

impl ProductListing {
    fn new(product: Product, amount_in_cart: i32) -> Self {
        ProductListing {
            price_formatted: product.unit_price().to_string(),
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount_in_cart,
        }
    }
}

/// Lists the catalog with the cart amount of each product.
pub async fn list_products(
    catalog: &dyn CatalogApi,
    store: &CartStore,
) -> Result<Vec<ProductListing>, ApiError> {
    debug!("list_products command");
    let products = catalog.list_products().await?;

    Ok(store.with_cart(|cart| {
        products
            .into_iter()
            .map(|product| {
                let amount = cart.amount_of(product.id);
                ProductListing::new(product, amount)
            })
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::NoOpNotifier;
    use async_trait::async_trait;
    use rocketshoes_api::{FetchError, FetchResult};
    use rocketshoes_core::{Cart, CartItem, Stock, CART_STORAGE_KEY};
    use rocketshoes_db::{CartRepository, MemoryStore};
    use std::sync::Arc;

    struct Listing(FetchResult<Vec<Product>>);

    #[async_trait]
    impl CatalogApi for Listing {
        async fn fetch_product(&self, product_id: ProductId) -> FetchResult<Product> {
            Err(FetchError::NotFound {
                path: format!("/products/{}", product_id),
            })
        }

        async fn fetch_stock(&self, product_id: ProductId) -> FetchResult<Stock> {
            Err(FetchError::NotFound {
                path: format!("/stock/{}", product_id),
            })
        }

        async fn list_products(&self) -> FetchResult<Vec<Product>> {
            self.0.clone()
        }
    }

    fn product(id: ProductId) -> Product {
        Product {
            id,
            title: format!("Tênis {}", id),
            price: 139.9,
            image: "https://example.com/tenis.jpg".to_string(),
        }
    }

    fn store_with(cart: Cart) -> CartStore {
        CartStore::new(
            cart,
            Arc::new(Listing(Ok(Vec::new()))),
            CartRepository::new(Arc::new(MemoryStore::new()), CART_STORAGE_KEY),
            Arc::new(NoOpNotifier),
        )
    }

    #[tokio::test]
    async fn test_listing_annotated_with_cart_amounts() {
        let cart = Cart::from_items(vec![CartItem::from_product(product(2), 3)]).unwrap();
        let store = store_with(cart);
        let catalog = Listing(Ok(vec![product(1), product(2)]));

        let listing = list_products(&catalog, &store).await.unwrap();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].amount_in_cart, 0);
        assert_eq!(listing[1].amount_in_cart, 3);
        assert_eq!(listing[1].price_formatted, "R$ 139,90");
    }

    #[tokio::test]
    async fn test_listing_failure() {
        let store = store_with(Cart::new());
        let catalog = Listing(Err(FetchError::Timeout {
            path: "/products".to_string(),
        }));

        let err = list_products(&catalog, &store).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);
    }
}
