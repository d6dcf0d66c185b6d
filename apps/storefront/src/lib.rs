//! # RocketShoes Storefront Library
//!
//! Wires the catalog client, cart storage and notifier into a
//! [`CartStore`](state::CartStore) and exposes the commands the UI calls.
//!
//! ## Module Organization
//! ```text
//! rocketshoes_storefront/
//! ├── lib.rs          ◄─── You are here (tracing setup & bootstrap)
//! ├── main.rs         ◄─── `rocketshoes` CLI
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore: add / remove / update / persist
//! │   ├── locks.rs    ◄─── Per-product operation locks
//! │   ├── notify.rs   ◄─── Notification sinks
//! │   └── config.rs   ◄─── StorefrontConfig loading
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart commands
//! │   └── product.rs  ◄─── Catalog listing
//! └── error.rs        ◄─── ApiError for commands, StartupError
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use rocketshoes_api::{ApiClient, CatalogApi};
use rocketshoes_db::{CartRepository, Database, DbConfig, KeyValueStore, MemoryStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::StartupError;
use state::{CartStore, Notifier, StorageBackend, StorefrontConfig};

/// The wired application.
pub struct Storefront {
    pub config: StorefrontConfig,
    pub catalog: Arc<dyn CatalogApi>,
    pub store: Arc<CartStore>,
    database: Option<Database>,
}

impl Storefront {
    /// Builds every component from configuration.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Build the HTTP catalog client ([api])                               │
    /// │  2. Open cart storage ([storage])                                       │
    /// │     • memory: process-local map                                         │
    /// │     • sqlite: WAL database file, migrations applied                     │
    /// │  3. Load the persisted cart (empty if absent or unreadable)             │
    /// │  4. Create the CartStore with the given notifier                        │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn bootstrap(
        config: StorefrontConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StartupError> {
        let catalog: Arc<dyn CatalogApi> = Arc::new(ApiClient::from_config(&config.api)?);
        info!(base_url = %config.api.base_url, "Catalog client ready");

        let mut database = None;
        let kv: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => {
                info!("Using in-memory cart storage");
                Arc::new(MemoryStore::new())
            }
            StorageBackend::Sqlite => {
                let path = config.storage.database_path()?;
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                info!(?path, "Opening cart database");
                let db = Database::new(DbConfig::new(path)).await?;
                let kv = Arc::new(db.kv());
                database = Some(db);
                kv
            }
        };

        let repository = CartRepository::new(kv, config.storage.cart_key.clone());
        let store = CartStore::open(Arc::clone(&catalog), repository, notifier).await;

        Ok(Storefront {
            config,
            catalog,
            store: Arc::new(store),
            database,
        })
    }

    /// Writes any pending cart changes and closes storage.
    pub async fn shutdown(self) -> Result<(), error::ApiError> {
        let flushed = self.store.flush().await;
        if let Some(db) = self.database {
            db.close().await;
        }
        info!("Storefront shut down");
        flushed
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rocketshoes=trace` - Show trace for rocketshoes crates only
/// - Default: INFO, DEBUG for rocketshoes crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rocketshoes=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
