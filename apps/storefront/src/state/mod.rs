//! # State Module
//!
//! The cart store and what it is wired with.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  StorefrontConfig ──► bootstrap ──► Arc<CartStore>                      │
//! │                                        │                                │
//! │          ┌─────────────────────────────┼──────────────────┐             │
//! │          ▼                             ▼                  ▼             │
//! │  ┌──────────────────┐  ┌──────────────────────┐  ┌──────────────────┐   │
//! │  │ Arc<dyn          │  │ CartRepository       │  │ Arc<dyn          │   │
//! │  │   CatalogApi>    │  │ (memory / SQLite kv) │  │   Notifier>      │   │
//! │  └──────────────────┘  └──────────────────────┘  └──────────────────┘   │
//! │                                                                         │
//! │  The store is passed explicitly to every command; there is no global.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod locks;
mod notify;

pub use cart::CartStore;
pub use config::{ConfigError, ConfigResult, StorageBackend, StorageSettings, StorefrontConfig};
pub use locks::{ProductGuard, ProductLocks};
pub use notify::{ChannelNotifier, LogNotifier, NoOpNotifier, Notification, Notifier};
