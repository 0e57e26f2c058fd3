//! Schema DDL for the customers and tickets tables.
//! Order follows the foreign key: customers before tickets.

use crate::error::AppError;
use crate::sql::{CUSTOMERS_TABLE, TICKETS_TABLE};
use sqlx::SqliteConnection;

/// Tables the tool gateway refuses to start without.
pub const REQUIRED_TABLES: &[&str] = &[CUSTOMERS_TABLE, TICKETS_TABLE];

const CUSTOMERS_DDL: &str = r#"
    CREATE TABLE customers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT,
        phone TEXT,
        status TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active', 'disabled')),
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const TICKETS_DDL: &str = r#"
    CREATE TABLE tickets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id INTEGER NOT NULL,
        issue TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'open' CHECK(status IN ('open', 'in_progress', 'resolved')),
        priority TEXT NOT NULL DEFAULT 'medium' CHECK(priority IN ('low', 'medium', 'high')),
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (customer_id) REFERENCES customers(id)
    )
"#;

/// CREATE both tables. Plain CREATE TABLE: fails if either already exists.
pub async fn apply_schema(conn: &mut SqliteConnection) -> Result<(), AppError> {
    for (table, ddl) in [(CUSTOMERS_TABLE, CUSTOMERS_DDL), (TICKETS_TABLE, TICKETS_DDL)] {
        sqlx::query(ddl).execute(&mut *conn).await?;
        tracing::info!(table, "created table");
    }
    Ok(())
}

/// Check that every table in [`REQUIRED_TABLES`] exists.
pub async fn verify_schema(conn: &mut SqliteConnection) -> Result<(), AppError> {
    for table in REQUIRED_TABLES {
        let found: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(*table)
                .fetch_optional(&mut *conn)
                .await?;
        if found.is_none() {
            return Err(AppError::Schema(format!("{} table not found", table)));
        }
    }
    Ok(())
}
