pub mod models;
pub mod repositories;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::config::DbConfig;

pub use repositories::{ClimateRepository, QueryError};

/// Read-only handle to the climate store
///
/// Opened once at startup and shared by every request; each query borrows a
/// pooled connection only for as long as it runs.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the store read-only and verify it answers queries
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        info!(url = %config.url, "opening climate store");

        let options = SqliteConnectOptions::from_str(&config.url)
            .with_context(|| format!("Invalid database url: {}", config.url))?
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open climate store at {}", config.url))?;

        Self::ping(&pool).await?;

        info!("climate store ready");
        Ok(Self { pool })
    }

    /// Perform a health check query
    pub async fn health_check(&self) -> Result<()> {
        Self::ping(&self.pool).await
    }

    async fn ping(pool: &SqlitePool) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }

    pub fn climate(&self) -> ClimateRepository<'_> {
        ClimateRepository::new(&self.pool)
    }

    /// Gracefully close the connection pool
    pub async fn close(self) {
        info!("closing climate store");
        self.pool.close().await;
    }
}
