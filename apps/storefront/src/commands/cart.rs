//! # Cart Commands
//!
//! ## Cart Page
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRODUTO                          QTD              SUBTOTAL             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Tênis de Caminhada Leve         [-] 2 [+]  [x]    R$ 279,80            │
//! │  Tênis VR Caminhada              [-] 1 [+]  [x]    R$ 139,90            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                             TOTAL  R$ 419,70            │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//!  [+] ──► update_product_amount(id, amount + 1)
//!  [-] ──► update_product_amount(id, amount - 1)   (ignored below 1)
//!  [x] ──► remove_product(id)
//! ```

use rocketshoes_core::{Cart, CartItem, CartTotals, ProductId, UpdateProductAmount};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CartStore;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(store: &CartStore) -> CartResponse {
    debug!("get_cart command");
    store.with_cart(|cart| CartResponse::from(cart))
}

/// Adds one unit of a product (the "ADICIONAR AO CARRINHO" button).
pub async fn add_product(store: &CartStore, product_id: ProductId) -> Result<CartResponse, ApiError> {
    debug!(product_id, "add_product command");
    store.add_product(product_id).await?;
    Ok(get_cart(store))
}

/// Removes a product's line.
pub async fn remove_product(
    store: &CartStore,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, "remove_product command");
    store.remove_product(product_id).await?;
    Ok(get_cart(store))
}

/// Sets a product's line to an absolute amount.
pub async fn update_product_amount(
    store: &CartStore,
    product_id: ProductId,
    amount: i32,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, amount, "update_product_amount command");
    store
        .update_product_amount(UpdateProductAmount { product_id, amount })
        .await?;
    Ok(get_cart(store))
}

/// Empties the cart.
pub async fn clear_cart(store: &CartStore) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    store.clear().await?;
    Ok(get_cart(store))
}
