//! # Cart Repository
//!
//! Loads and saves the cart snapshot under a fixed storage key.
//!
//! ## Load Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.get(key)                                                         │
//! │     │                                                                   │
//! │     ├── None ─────────────────────────► empty cart                      │
//! │     ├── Err(DbError) ─────────────────► empty cart (warn)               │
//! │     └── Some(json)                                                      │
//! │            ├── Cart::restore Ok ──────► that cart, minus bad lines      │
//! │            │                            (warn per dropped line)         │
//! │            └── Cart::restore Err ─────► empty cart (warn)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A corrupt snapshot is never deleted on load; the next successful save
//! overwrites it.

use std::sync::Arc;

use rocketshoes_core::Cart;
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::kv::KeyValueStore;

/// Repository for the persisted cart.
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for CartRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartRepository")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CartRepository {
    /// Creates a repository storing the cart under `key`.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        CartRepository {
            store,
            key: key.into(),
        }
    }

    /// Returns the storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the persisted cart, falling back to an empty cart.
    pub async fn load(&self) -> Cart {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No persisted cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read persisted cart, starting empty");
                return Cart::new();
            }
        };

        match Cart::restore(&raw) {
            Ok((cart, dropped)) => {
                for item in &dropped {
                    warn!(
                        key = %self.key,
                        product_id = item.id,
                        amount = item.amount,
                        "Dropping invalid line from persisted cart"
                    );
                }
                debug!(key = %self.key, items = cart.len(), "Persisted cart loaded");
                cart
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Persisted cart is unreadable, starting empty");
                Cart::new()
            }
        }
    }

    /// Writes the cart snapshot, replacing the previous one.
    pub async fn save(&self, cart: &Cart) -> DbResult<()> {
        let json = cart.to_json()?;
        self.store.set(&self.key, &json).await?;

        debug!(key = %self.key, items = cart.len(), "Cart persisted");
        Ok(())
    }

    /// Deletes the persisted cart.
    pub async fn delete(&self) -> DbResult<()> {
        self.store.remove(&self.key).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
