use crate::{
    adapters::persistence::PostgresPersistence,
    infra::{
        config::AppConfig,
        db::{init_db, run_migrations},
    },
};

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod http_client;
pub mod setup;

pub use error::InfraError;

pub async fn postgres_persistence(config: &AppConfig) -> Result<PostgresPersistence, InfraError> {
    let pool = init_db(&config.database_url, config.db_max_connections).await?;
    run_migrations(&pool).await?;
    let persistence = PostgresPersistence::new(pool);
    Ok(persistence)
}
