//! PostgreSQL persistence for surveys, submissions and analytics reads.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default pool size when none is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Connect to the first reachable endpoint among `urls`, in order.
///
/// Every failed attempt is logged. If all endpoints fail the last error is
/// returned; an empty list yields `PoolTimedOut`.
pub async fn connect_with_fallback(
    urls: &[String],
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    let mut last_error = sqlx::Error::PoolTimedOut;

    for (attempt, url) in urls.iter().enumerate() {
        match create_pool(url, max_connections).await {
            Ok(pool) => {
                if attempt > 0 {
                    tracing::info!(attempt, "Connected using fallback database endpoint");
                }
                return Ok(pool);
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Database endpoint unreachable");
                last_error = e;
            }
        }
    }

    Err(last_error)
}

/// Round-trip a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
