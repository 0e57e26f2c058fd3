//! Destructive setup: deletes the database file at the target path, then recreates the
//! schema and the fixed demonstration dataset.
//!
//! Usage: `support-setup [PATH]` (default: `SUPPORT_DB_PATH` or `customer_service.db`).

use std::path::PathBuf;
use support_tools::{create_database, database_stats, AppError, GatewayConfig};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("support_tools=info,support_setup=info")),
        )
        .init();

    let config = GatewayConfig::from_env()?;
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or(config.database_path);

    tracing::warn!(path = %path.display(), "recreating database; existing data at this path is deleted");
    let pool = create_database(&path).await?;
    database_stats(&pool).await?.log();
    pool.close().await;
    tracing::info!(path = %path.display(), "setup complete");
    Ok(())
}
