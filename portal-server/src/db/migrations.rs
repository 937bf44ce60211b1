//! Embedded schema migrations

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;

/// Migrations compiled in from `portal-server/migrations`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply any pending migrations.
pub async fn run(pool: &PgPool) -> Result<(), MigrateError> {
    tracing::info!("Running portal migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Migrations up to date");
    Ok(())
}
