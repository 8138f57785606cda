//! PostgreSQL connection pool setup.
//!
//! The pool is opened once at boot and shared read-only across request
//! tasks. An unreachable database at boot is fatal, so the first
//! connection is established eagerly rather than on first use.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Bound on establishing the initial connection at boot.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool against the configured database and verify connectivity.
pub async fn open_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(CONNECT_TIMEOUT)
        .connect(database_url)
        .await?;

    tracing::info!(max_connections = 10, "database pool ready");

    Ok(pool)
}
