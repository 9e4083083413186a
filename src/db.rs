//! Persistence gateway: the one shared pool, opened at startup and closed at shutdown.

use crate::config::DbSettings;
use crate::error::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open the pool and verify a connection can be made. No retry.
    pub async fn connect(settings: &DbSettings) -> Result<Self, AppError> {
        tracing::info!(target: "bookshelf_api::db", dsn = %settings.connection_string(), "connecting");
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(settings.connect_options())
            .await?;
        tracing::info!(target: "bookshelf_api::db", "connection established");
        Ok(Self { pool })
    }

    /// Pool that connects on first use. Nothing is contacted until a query runs.
    pub fn connect_lazy(settings: &DbSettings) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_lazy_with(settings.connect_options());
        Self { pool }
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await.is_ok()
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(target: "bookshelf_api::db", "connection pool closed");
    }
}
