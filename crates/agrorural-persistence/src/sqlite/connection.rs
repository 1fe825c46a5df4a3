//! SQLite Connection Management
//!
//! ## Modes
//!
//! - **Memory**: `sqlite::memory:` - one connection, so every query sees the
//!   same database (testing/development)
//! - **File**: `sqlite://path/to/db` - created when missing (production)
//!
//! Foreign keys are enforced and the embedded migrations run on connect.
//!
//! Writes that read before they write open their transaction with
//! `BEGIN IMMEDIATE`, so the write lock is held from the first read and
//! concurrent writers queue on `busy_timeout` instead of failing with
//! `SQLITE_BUSY` on lock upgrade.
//!
//! ## Usage
//!
//! ```ignore
//! use agrorural_persistence::sqlite::connect;
//!
//! let store = connect("sqlite::memory:").await?;
//! let store = connect("sqlite://agrorural.db").await?;
//! ```

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

use crate::error::PersistenceError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Pool size used for file databases
const FILE_POOL_SIZE: u32 = 5;

/// How long a writer waits for the database lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// SQLite implementation of every repository trait
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap an existing pool; the schema must already be migrated
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a transaction that holds the write lock from its first statement
    pub(super) async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin_with("BEGIN IMMEDIATE").await
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Whether the URL names a transient in-memory database
pub fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open the database, apply migrations and return the store
pub async fn connect(database_url: &str) -> Result<SqliteStore, PersistenceError> {
    let in_memory = is_memory_url(database_url);
    debug!(database_url, in_memory, "Connecting to SQLite");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool_options = if in_memory {
        // A second connection would open a different empty database
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(FILE_POOL_SIZE)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| PersistenceError::Connection(e.to_string()))?;

    MIGRATOR.run(&pool).await?;
    info!(in_memory, "SQLite ready");

    Ok(SqliteStore::new(pool))
}
