//! # Key-Value Storage
//!
//! The persistence contract the cart needs: string values under string
//! keys. Writes replace the previous value; there are no transactions
//! spanning keys.
//!
//! ## Implementations
//!
//! - [`memory::MemoryStore`] - process-local map (tests, ephemeral sessions)
//! - [`sqlite::SqliteStore`] - `key_value` table in the SQLite database

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::DbResult;

/// String key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> DbResult<()>;
}
