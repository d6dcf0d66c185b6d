//! # API Error Type
//!
//! Unified error type for cart operations and commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  store.add_product(3)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Product fetch failed? ── FetchError ──► ADD_PRODUCT_ERROR       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Stock exceeded? ─── CoreError::OutOfStock ──► OUT_OF_STOCK      │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Committed ────────────────────────────────────────► Ok(())      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Err(ApiError) returned to the caller AND                               │
//! │  error.notification() sent to the Notifier (toast)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same failure kind always maps to the same code, whatever the
//! underlying cause; the cause is kept in `message` for logs and callers.

use rocketshoes_api::FetchError;
use rocketshoes_core::CoreError;
use rocketshoes_db::DbError;
use serde::Serialize;

use crate::state::Notification;

/// Error returned from cart operations and commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "OUT_OF_STOCK",
///   "message": "Product 3 out of stock: available 5, requested 6"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product could not be fetched or turned into a cart line
    AddProductError,

    /// Requested amount exceeds stock
    OutOfStock,

    /// Remove target is not in the cart
    RemoveProductError,

    /// Update target missing or its stock unavailable
    UpdateAmountError,

    /// Input validation failed
    ValidationError,

    /// The cart could not be persisted
    StorageError,

    /// Catalog listing could not be fetched
    CatalogError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an add-product error.
    pub fn add_product(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::AddProductError, message)
    }

    /// Creates a remove-product error.
    pub fn remove_product(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::RemoveProductError, message)
    }

    /// Creates an update-amount error.
    pub fn update_amount(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::UpdateAmountError, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Returns the user notification for this failure, if it has one.
    pub fn notification(&self) -> Option<Notification> {
        match self.code {
            ErrorCode::AddProductError => Some(Notification::AddProductFailed),
            ErrorCode::OutOfStock => Some(Notification::OutOfStock),
            ErrorCode::RemoveProductError => Some(Notification::RemoveProductFailed),
            ErrorCode::UpdateAmountError => Some(Notification::UpdateAmountFailed),
            _ => None,
        }
    }
}

/// Converts core errors to API errors.
///
/// `NotInCart` has no code of its own: which operation failed decides it,
/// so callers map that case before falling back to this.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OutOfStock { .. } => ApiError::new(ErrorCode::OutOfStock, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::NotInCart(_) | CoreError::DuplicateItem(_) | CoreError::InvalidSnapshot(_) => {
                ApiError::internal(err.to_string())
            }
        }
    }
}

/// Converts storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        tracing::error!("Storage operation failed: {}", err);
        ApiError::new(ErrorCode::StorageError, "Failed to persist the cart")
    }
}

/// Converts fetch errors outside a cart operation (catalog listing).
impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        ApiError::new(ErrorCode::CatalogError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Startup Errors
// =============================================================================

/// Failures while wiring the application together.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] crate::state::ConfigError),

    /// The HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] rocketshoes_api::ConfigError),

    /// Cart storage could not be opened.
    #[error("Failed to open cart storage: {0}")]
    Storage(#[from] DbError),

    /// Data directory could not be created.
    #[error("Failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}
