//! Applies module migrations against SQLite, recording each one in a ledger
//! table so reruns are no-ops.

use catalog_kernel::Migration;
use sqlx::SqlitePool;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{StoreError, StoreResult};

const LEDGER_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS schema_migrations (
        module     TEXT NOT NULL,
        id         TEXT NOT NULL,
        applied_at TEXT NOT NULL,
        PRIMARY KEY (module, id)
    )
"#;

/// Apply every migration not yet present in the ledger, in the given order.
/// Returns how many were applied.
pub async fn apply(pool: &SqlitePool, migrations: &[(String, Migration)]) -> StoreResult<usize> {
    sqlx::query(LEDGER_DDL).execute(pool).await?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let already: Option<(String,)> =
            sqlx::query_as("SELECT id FROM schema_migrations WHERE module = ? AND id = ?")
                .bind(module)
                .bind(migration.id)
                .fetch_optional(pool)
                .await?;
        if already.is_some() {
            tracing::debug!(target: "catalog-db", module = %module, id = migration.id, "migration already applied");
            continue;
        }

        let failed = |source: sqlx::Error| StoreError::Migration {
            module: module.clone(),
            id: migration.id,
            source,
        };

        let mut tx = pool.begin().await?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;
        sqlx::query("INSERT INTO schema_migrations (module, id, applied_at) VALUES (?, ?, ?)")
            .bind(module)
            .bind(migration.id)
            .bind(applied_at())
            .execute(&mut *tx)
            .await
            .map_err(failed)?;
        tx.commit().await?;

        tracing::info!(target: "catalog-db", module = %module, id = migration.id, "applied migration");
        applied += 1;
    }

    Ok(applied)
}

fn applied_at() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| OffsetDateTime::now_utc().unix_timestamp().to_string())
}
