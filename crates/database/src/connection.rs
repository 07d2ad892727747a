use crate::error::DbError;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Settings for the connection pool, usually taken from the `[database]`
/// section of the application configuration.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool is created once at start-up and shared across the entire
/// application.
pub async fn connect(settings: &PoolSettings) -> Result<PgPool, DbError> {
    if settings.url.trim().is_empty() {
        return Err(DbError::ConnectionConfigError("database url must be set.".to_string()));
    }

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(&settings.url)
        .await?;

    tracing::info!(max_connections = settings.max_connections, "Database connection pool established.");
    Ok(pool)
}
