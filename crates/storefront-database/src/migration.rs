//! Embedded schema migrations.

use storefront_core::{AppError, AppResult};

use crate::connection::DatabasePool;

/// Applies every pending migration bundled into the binary.
///
/// Runs at startup before the store is handed to any service, so the
/// schema is always current by the time requests arrive.
pub async fn run_migrations(pool: &DatabasePool) -> AppResult<()> {
    tracing::info!("running database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool.inner())
        .await
        .map_err(|err| AppError::database("Failed to run migrations").with_source(err))?;

    tracing::info!("database migrations complete");
    Ok(())
}
