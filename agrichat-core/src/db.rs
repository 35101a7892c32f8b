use std::str::FromStr;

use crate::config::DatabaseConfig;
use crate::error::AgriError;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, AgriError> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| AgriError::Other("DATABASE_URL is not set".to_string()))?;

    let mut options = PgConnectOptions::from_str(url)?;
    if let Some(name) = config.name.as_deref() {
        options = options.database(name);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn health_check(pool: &PgPool) -> Result<String, sqlx::Error> {
    let row: (String,) = sqlx::query_as("SELECT version()").fetch_one(pool).await?;
    Ok(row.0)
}

/// Apply the embedded migrations in `agrichat-core/migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
