//! # Domain Types
//!
//! Core domain types shared by the catalog client, the storage layer and
//! the cart store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Stock       │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  title          │   │  amount         │   │  title, price   │       │
//! │  │  price          │   │  (available)    │   │  image          │       │
//! │  │  image          │   └─────────────────┘   │  amount (≥ 1)   │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │   GET /products/{id}     GET /stock/{id}       persisted in cart        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names match the JSON served by the products API and the JSON
//! already stored in existing carts, so no renaming is applied.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Identifier of a product (and of its stock record).
pub type ProductId = u32;

// =============================================================================
// Product
// =============================================================================

/// A product as served by the catalog (`GET /products/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name shown on the product card and in the cart.
    pub title: String,

    /// Unit price in the storefront currency, as sent by the API (e.g. `179.9`).
    pub price: f64,

    /// URL of the product image.
    pub image: String,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_decimal(self.price)
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Units available for a product (`GET /stock/{id}`).
///
/// Read-only from the cart's point of view and fetched fresh on every
/// add/update, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stock {
    pub id: ProductId,

    /// Units available.
    pub amount: i32,
}

impl Stock {
    /// Checks if `requested` units can be served from this stock.
    #[inline]
    pub fn covers(&self, requested: i32) -> bool {
        requested <= self.amount
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the cart: the fetched product plus the amount wanted.
///
/// ## Lifecycle
/// - Created when a product is first added (amount = 1)
/// - Mutated only through amount updates
/// - Destroyed on removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,

    /// Units in the cart, always ≥ 1.
    pub amount: i32,
}

impl CartItem {
    /// Builds a line item from a fetched product.
    pub fn from_product(product: Product, amount: i32) -> Self {
        CartItem {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_decimal(self.price)
    }

    /// Calculates the line total (unit price × amount).
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(i64::from(self.amount))
    }
}

/// Request to set a cart line to an absolute amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i32,
}

// =============================================================================
// Unit Tests
// =============================================================================
