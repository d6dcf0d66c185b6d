//! # Error Types
//!
//! Domain-specific error types for rocketshoes-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocketshoes-core errors (this file)                                   │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rocketshoes-db / rocketshoes-api (separate crates)                    │
//! │  ├── DbError          - Storage failures                               │
//! │  └── FetchError       - Product / stock fetch failures                 │
//! │                                                                         │
//! │  Storefront app                                                         │
//! │  └── ApiError         - What the UI sees (code + notification)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Requested amount exceeds the units in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart page: click "+" on an item with amount 5
    ///      │
    ///      ▼
    /// GET /stock/3 → { amount: 5 }
    ///      │
    ///      ▼
    /// OutOfStock { product_id: 3, available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// Toast: "Quantidade solicitada fora de estoque"
    /// ```
    #[error("Product {product_id} out of stock: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        available: i32,
        requested: i32,
    },

    /// The target of a remove/update is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// A second line for the same product was about to be inserted.
    #[error("Product {0} is already in the cart")]
    DuplicateItem(ProductId),

    /// A persisted cart snapshot could not be decoded or encoded.
    #[error("Invalid cart snapshot: {0}")]
    InvalidSnapshot(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::InvalidSnapshot(err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
