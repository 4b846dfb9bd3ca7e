use std::str::FromStr;

use anyhow::Context;
use catalog_kernel::settings::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Open the SQLite pool described by `settings`, creating the database file
/// when it does not exist yet.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    tracing::info!(target: "catalog-db", url = %settings.url, "connecting to database");

    let options = SqliteConnectOptions::from_str(&settings.url)
        .with_context(|| format!("invalid database url '{}'", settings.url))?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to '{}'", settings.url))
}

/// Private in-memory database. A single connection that is never recycled
/// keeps every query on the same database.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .context("invalid in-memory database url")?
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("failed to open in-memory database")
}
