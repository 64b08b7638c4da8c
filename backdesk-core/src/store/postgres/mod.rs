//! PostgreSQL store implementations and pool construction.

pub mod products;
pub mod users;

pub use products::PostgresProductStore;
pub use users::PostgresUserStore;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::error::{AuthError, Result};

/// Connect a bounded pool suitable for request-scoped queries.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .max_lifetime(std::time::Duration::from_secs(1800))
        .idle_timeout(std::time::Duration::from_secs(600))
        .connect(database_url)
        .await
        .map_err(|err| AuthError::Storage(err.into()))?;

    info!(max_connections, "database pool initialized");
    Ok(pool)
}
