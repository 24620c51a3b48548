use crate::{
    adapters::persistence::PostgresPersistence,
    infra::{config::PoolSettings, db::init_db, error::InfraError},
};

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod setup;

pub async fn postgres_persistence(
    database_url: &str,
    settings: &PoolSettings,
) -> Result<PostgresPersistence, InfraError> {
    let pool = init_db(database_url, settings).await?;
    let persistence = PostgresPersistence::new(pool);
    Ok(persistence)
}
