//! SQLite connection setup, the destructive initializer, and grouped row counts.

use crate::error::AppError;
use crate::migration::{apply_schema, verify_schema};
use crate::seed::insert_seed_data;
use crate::sql::{count_grouped_by, CUSTOMERS_TABLE, TICKETS_TABLE};
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

/// Database file used when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "customer_service.db";

/// Build a pool for the file at `path`. Foreign keys are enforced on every connection.
pub async fn connect(path: &Path, create_if_missing: bool, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(create_if_missing)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Open an existing database and verify both tables exist. Never creates the file.
pub async fn open_existing(path: &Path, max_connections: u32) -> Result<SqlitePool, AppError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(AppError::Schema(format!(
            "database file not found: {}",
            path.display()
        )));
    }
    let pool = connect(path, false, max_connections).await?;
    let mut conn = pool.acquire().await?;
    verify_schema(&mut conn).await?;
    drop(conn);
    Ok(pool)
}

/// DESTRUCTIVE: delete any file at `path`, then create the schema and insert the seed dataset.
/// Schema and seed rows are written in one transaction; any failure aborts the whole setup.
pub async fn create_database(path: &Path) -> Result<SqlitePool, AppError> {
    if tokio::fs::try_exists(path).await? {
        tokio::fs::remove_file(path).await?;
        tracing::warn!(path = %path.display(), "removed existing database");
    }
    let pool = connect(path, true, 1).await?;
    let mut tx = pool.begin().await?;
    apply_schema(&mut tx).await?;
    insert_seed_data(&mut tx).await?;
    tx.commit().await?;
    tracing::info!(path = %path.display(), "database created");
    Ok(pool)
}

/// Row counts grouped by each enumerated column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    pub customers_by_status: Vec<(String, i64)>,
    pub tickets_by_status: Vec<(String, i64)>,
    pub tickets_by_priority: Vec<(String, i64)>,
}

impl DatabaseStats {
    pub fn log(&self) {
        for (group, rows) in [
            ("customers_by_status", &self.customers_by_status),
            ("tickets_by_status", &self.tickets_by_status),
            ("tickets_by_priority", &self.tickets_by_priority),
        ] {
            for (value, count) in rows {
                tracing::info!(group, value = %value, count, "database stats");
            }
        }
    }
}

pub async fn database_stats(pool: &SqlitePool) -> Result<DatabaseStats, AppError> {
    let mut conn = pool.acquire().await?;
    let mut grouped = Vec::with_capacity(3);
    for (table, column) in [
        (CUSTOMERS_TABLE, "status"),
        (TICKETS_TABLE, "status"),
        (TICKETS_TABLE, "priority"),
    ] {
        let q = count_grouped_by(table, column);
        tracing::debug!(sql = %q.sql, "query");
        let rows: Vec<(String, i64)> = sqlx::query_as(&q.sql).fetch_all(&mut *conn).await?;
        grouped.push(rows);
    }
    let tickets_by_priority = grouped.pop().unwrap_or_default();
    let tickets_by_status = grouped.pop().unwrap_or_default();
    let customers_by_status = grouped.pop().unwrap_or_default();
    Ok(DatabaseStats {
        customers_by_status,
        tickets_by_status,
        tickets_by_priority,
    })
}
