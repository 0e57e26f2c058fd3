#![allow(dead_code)]

use std::path::PathBuf;
use support_tools::{create_database, GatewayConfig, ToolGateway};
use tempfile::TempDir;

pub const SEED_CUSTOMERS: usize = 10;
pub const SEED_TICKETS: usize = 16;

/// Fresh seeded database in a temp dir. Keep the TempDir alive for the test's duration.
pub async fn seeded_gateway() -> (TempDir, ToolGateway) {
    let (dir, path) = seeded_file().await;
    let gateway = ToolGateway::open(&GatewayConfig::for_database(path))
        .await
        .expect("open gateway");
    (dir, gateway)
}

pub async fn seeded_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("customer_service.db");
    let pool = create_database(&path).await.expect("create database");
    pool.close().await;
    (dir, path)
}

pub async fn ticket_count(gateway: &ToolGateway) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tickets")
        .fetch_one(gateway.pool())
        .await
        .expect("count tickets");
    n
}
