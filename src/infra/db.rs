use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::infra::{config::PoolSettings, error::InfraError};

pub async fn init_db(database_url: &str, settings: &PoolSettings) -> Result<PgPool, InfraError> {
    let pool = PgPoolOptions::new()
        .min_connections(settings.size)
        .max_connections(settings.max_connections())
        .acquire_timeout(settings.acquire_timeout)
        .max_lifetime(settings.recycle)
        .test_before_acquire(settings.pre_ping)
        .connect(database_url)
        .await?;

    info!(
        min_connections = settings.size,
        max_connections = settings.max_connections(),
        "Connected to database!"
    );
    Ok(pool)
}

/// Applies the migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(InfraError::Migration)?;

    info!("Database migrations applied");
    Ok(())
}
