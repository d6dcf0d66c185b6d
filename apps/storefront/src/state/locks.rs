//! # Per-Product Locks
//!
//! Serialises cart operations on the same product id across their
//! fetch-then-mutate sequence. Operations on different ids never wait on
//! each other.
//!
//! ```text
//! add_product(1) ──► acquire(1) ── fetch stock ── fetch product ── commit ── release
//! add_product(1) ──► acquire(1) ···················waits···················► ...
//! add_product(2) ──► acquire(2) ── fetch ── commit ── release   (independent)
//! ```
//!
//! Entries nobody holds or waits for are pruned on the next acquire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rocketshoes_core::ProductId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Held for the duration of one operation on a product.
#[derive(Debug)]
pub struct ProductGuard {
    _guard: OwnedMutexGuard<()>,
}

/// Map of product id to its async lock.
#[derive(Debug, Default)]
pub struct ProductLocks {
    locks: Mutex<HashMap<ProductId, Arc<AsyncMutex<()>>>>,
}

impl ProductLocks {
    /// Creates an empty lock map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `product_id`.
    pub async fn acquire(&self, product_id: ProductId) -> ProductGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Only the map holds the Arc: nobody owns or awaits that lock.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(product_id).or_default())
        };

        ProductGuard {
            _guard: lock.lock_owned().await,
        }
    }

    /// Number of ids currently tracked.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Checks if no ids are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
