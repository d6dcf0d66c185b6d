//! # rocketshoes-db: Storage Layer for RocketShoes
//!
//! This crate persists the cart between sessions. The cart store only needs
//! a string key-value store (`get` / `set`), so that is the whole contract;
//! SQLite is one implementation of it, an in-memory map is another.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     RocketShoes Persistence                             │
//! │                                                                         │
//! │  CartStore (after each committed mutation)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  rocketshoes-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │ CartRepository │──►│ KeyValueStore  │   │  Migrations   │  │   │
//! │  │   │ load / save    │   │ (trait)        │   │  (embedded)   │  │   │
//! │  │   │ JSON snapshot  │   ├────────────────┤   │               │  │   │
//! │  │   └────────────────┘   │ MemoryStore    │   │ 001_kv.sql    │  │   │
//! │  │                        │ SqliteStore ◄──┼───┤               │  │   │
//! │  │                        └────────────────┘   └───────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/rocketshoes/cart.db   (key_value table)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - SQLite connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`kv`] - The key-value contract and its implementations
//! - [`repository`] - Cart snapshot repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rocketshoes_db::{CartRepository, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("cart.db")).await?;
//! let carts = CartRepository::new(Arc::new(db.kv()), rocketshoes_core::CART_STORAGE_KEY);
//!
//! let cart = carts.load().await;
//! carts.save(&cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use kv::memory::MemoryStore;
pub use kv::sqlite::SqliteStore;
pub use kv::KeyValueStore;
pub use pool::{Database, DbConfig};
pub use repository::cart::CartRepository;
