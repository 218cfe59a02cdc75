//! Database connection management
//!
//! Provides database connection pooling, migrations and health checks.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;

/// Type alias for the database connection pool
pub type DatabasePool = SqlitePool;

/// Database connection statistics
#[derive(Debug, Clone)]
pub struct PoolStatistics {
    /// Number of currently idle connections
    pub idle_connections: u32,

    /// Number of currently active connections
    pub active_connections: u32,

    /// Connections currently open
    pub open_connections: u32,
}

/// Database connection wrapper
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: Arc<DatabasePool>,
}

impl DatabaseConnection {
    /// Create a new database connection from a connection string
    ///
    /// # Arguments
    /// * `database_url` - SQLite connection string (e.g., "sqlite://haccp.db")
    ///
    /// The database file is created when missing and foreign keys are enforced.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::with_max_connections(database_url, 5).await
    }

    /// Create a new database connection with custom pool size
    pub async fn with_max_connections(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Private in-memory database on a single long-lived connection
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Run migrations on the database
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations")
            .run(self.pool.as_ref())
            .await
    }

    /// Perform a health check by running a simple query
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }

    /// Get connection pool statistics
    pub fn get_pool_statistics(&self) -> PoolStatistics {
        let idle = self.pool.num_idle() as u32;
        let open = self.pool.size();

        PoolStatistics {
            idle_connections: idle,
            active_connections: open.saturating_sub(idle),
            open_connections: open,
        }
    }

    /// Close the connection pool gracefully
    pub async fn close(self) {
        self.pool.close().await;
    }
}
