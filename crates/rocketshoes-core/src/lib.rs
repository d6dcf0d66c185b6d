//! # rocketshoes-core: Pure Cart Logic for RocketShoes
//!
//! This crate is the **heart** of the RocketShoes storefront cart. It holds
//! the cart data model and every rule that decides whether a cart mutation
//! is allowed, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     RocketShoes Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Product List ──► Add to Cart ──► Cart Page (+ / - / remove) │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 CartStore (apps/storefront)                     │   │
//! │  │    add_product, remove_product, update_product_amount          │   │
//! │  └──────┬───────────────────────┬──────────────────────┬──────────┘   │
//! │         │                       │                      │               │
//! │  ┌──────▼──────────┐   ┌────────▼─────────┐   ┌────────▼──────────┐   │
//! │  │ ★ THIS CRATE ★  │   │ rocketshoes-api  │   │ rocketshoes-db    │   │
//! │  │ Cart, CartItem  │   │ products / stock │   │ cart snapshot     │   │
//! │  │ Money, checks   │   │ over HTTP        │   │ key-value store   │   │
//! │  └─────────────────┘   └──────────────────┘   └───────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Stock, CartItem)
//! - [`cart`] - The id-unique cart and its mutations
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation (amounts, stock limits)
//!
//! ## Example Usage
//!
//! ```rust
//! use rocketshoes_core::{Cart, CartItem, Product, Stock};
//! use rocketshoes_core::validation::check_stock;
//!
//! let product = Product {
//!     id: 1,
//!     title: "Tênis de Caminhada Leve Confortável".to_string(),
//!     price: 179.9,
//!     image: "https://example.com/shoe.jpg".to_string(),
//! };
//! let stock = Stock { id: 1, amount: 3 };
//!
//! let mut cart = Cart::new();
//! check_stock(1, &stock).unwrap();
//! cart.insert(CartItem::from_product(product, 1)).unwrap();
//!
//! assert_eq!(cart.total_amount(), 1);
//! assert_eq!(cart.subtotal().cents(), 17990);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key under which the cart snapshot is persisted.
///
/// The value stored under this key is a JSON array of [`CartItem`]s.
/// Existing browser carts were saved with this exact key, so it must not
/// change without a migration.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Amount a product enters the cart with.
pub const INITIAL_AMOUNT: i32 = 1;
