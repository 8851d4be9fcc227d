pub mod admin_repo;
pub mod lookup_repo;
pub mod participant_repo;
pub mod repository_error;
pub mod workshop_repo;

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{error, info};

use crate::config::PostgresConfig;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Open the shared connection pool.
pub async fn connect(config: &PostgresConfig) -> RepositoryResult<PgPool> {
    info!(max_connections = config.max_connections, "Connecting to Postgres");
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| {
            error!("Failed to connect to Postgres: {}", e);
            RepositoryError::connection(format!("Failed to connect to Postgres: {}", e))
        })
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations complete");
    Ok(())
}
