//! # Validation Module
//!
//! Input validation and the stock-limit rule.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                 │
//! │  └── "-" button disabled at amount 1                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: CartStore                                                     │
//! │  ├── amount < 1  → silently ignored (is_valid_amount)                   │
//! │  └── THIS MODULE: stock limit                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart                                                          │
//! │  └── id uniqueness, amount ≥ 1 on every line                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{ProductId, Stock};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Checks whether `amount` is a usable cart amount (≥ 1).
///
/// The cart store uses this to silently ignore decrements below one.
#[inline]
pub const fn is_valid_amount(amount: i32) -> bool {
    amount >= 1
}

/// Validates a cart amount.
///
/// ## Example
/// ```rust
/// use rocketshoes_core::validation::validate_amount;
///
/// assert!(validate_amount(1).is_ok());
/// assert!(validate_amount(0).is_err());
/// ```
pub fn validate_amount(amount: i32) -> ValidationResult<()> {
    if !is_valid_amount(amount) {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(())
}

/// Validates a product id (ids start at 1).
pub fn validate_product_id(id: ProductId) -> ValidationResult<()> {
    if id == 0 {
        return Err(ValidationError::MustBePositive {
            field: "product_id".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Stock Rule
// =============================================================================

/// Rejects a requested amount that exceeds the units in stock.
///
/// ## Example
/// ```rust
/// use rocketshoes_core::Stock;
/// use rocketshoes_core::validation::check_stock;
///
/// let stock = Stock { id: 1, amount: 5 };
/// assert!(check_stock(5, &stock).is_ok());
/// assert!(check_stock(6, &stock).is_err());
/// ```
pub fn check_stock(requested: i32, stock: &Stock) -> CoreResult<()> {
    if !stock.covers(requested) {
        return Err(CoreError::OutOfStock {
            product_id: stock.id,
            available: stock.amount,
            requested,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
