//! # Cart Database
//!
//! Opens the SQLite file that backs the key-value store.
//!
//! ```text
//! DbConfig::new(path) ──► Database::new ──► migrations ──► db.kv() ──► CartRepository
//! ```
//!
//! File databases run in WAL mode, so a crash between two cart writes leaves
//! the last completed write intact. The in-memory form lives on a single
//! connection that is never recycled; a fresh one would see an empty database.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::kv::sqlite::SqliteStore;
use crate::migrations;

/// Where the cart database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbConfig {
    /// A database file, created if missing.
    File(PathBuf),

    /// A private in-memory database.
    InMemory,
}

impl DbConfig {
    /// Configures a file-backed database at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig::File(path.into())
    }

    /// Configures an in-memory database.
    pub fn in_memory() -> Self {
        DbConfig::InMemory
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        match self {
            DbConfig::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .busy_timeout(Duration::from_secs(5)),
            DbConfig::InMemory => SqliteConnectOptions::new().in_memory(true),
        }
    }

    fn max_connections(&self) -> u32 {
        match self {
            DbConfig::File(_) => 2,
            DbConfig::InMemory => 1,
        }
    }
}

/// Handle to the open cart database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database and applies pending migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(?config, "Opening cart database");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections())
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        migrations::run_migrations(&pool).await?;
        Ok(Database { pool })
    }

    /// Returns the key-value store backed by this database.
    pub fn kv(&self) -> SqliteStore {
        SqliteStore::new(self.pool.clone())
    }

    /// Closes every connection.
    pub async fn close(&self) {
        info!("Closing cart database");
        self.pool.close().await;
    }
}
