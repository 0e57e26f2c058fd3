//! The tool gateway: validates raw tool inputs, runs the operation, and turns every
//! failure into the tool's sentinel result (None, empty, or false) after logging it.

use crate::config::GatewayConfig;
use crate::error::AppError;
use crate::migration::verify_schema;
use crate::model::{Customer, CustomerHistory, ServerStats, Ticket};
use crate::service::{SupportService, ToolValidator};
use crate::store::open_existing;
use serde_json::{Map, Value};
use sqlx::SqlitePool;

/// Default `limit` for `list_customers`.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct ToolGateway {
    pool: SqlitePool,
}

impl ToolGateway {
    /// Open the configured database. A missing file or missing table is a construction error.
    pub async fn open(config: &GatewayConfig) -> Result<Self, AppError> {
        let pool = open_existing(&config.database_path, config.max_connections).await?;
        tracing::info!(path = %config.database_path.display(), "tool gateway ready");
        Ok(ToolGateway { pool })
    }

    /// Wrap an existing pool after checking the schema.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, AppError> {
        let mut conn = pool.acquire().await?;
        verify_schema(&mut conn).await?;
        drop(conn);
        Ok(ToolGateway { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn get_customer(&self, customer_id: i64) -> Option<Customer> {
        tracing::info!(customer_id, "tool call: get_customer");
        let result = SupportService::get_customer(&self.pool, customer_id).await;
        match settle("get_customer", result)? {
            Some(c) => {
                tracing::info!(customer_id, name = %c.name, "customer found");
                Some(c)
            }
            None => {
                tracing::warn!(customer_id, "customer not found");
                None
            }
        }
    }

    pub async fn list_customers(&self, status: Option<&str>, limit: i64) -> Vec<Customer> {
        tracing::info!(status, limit, "tool call: list_customers");
        let result = async {
            let status = ToolValidator::customer_status_filter(status)?;
            let limit = ToolValidator::limit(limit)?;
            SupportService::list_customers(&self.pool, status, limit).await
        }
        .await;
        let customers = settle("list_customers", result).unwrap_or_default();
        tracing::info!(count = customers.len(), "customers listed");
        customers
    }

    pub async fn update_customer(&self, customer_id: i64, fields: &Map<String, Value>) -> bool {
        tracing::info!(customer_id, keys = ?fields.keys().collect::<Vec<_>>(), "tool call: update_customer");
        let result = async {
            let update = ToolValidator::customer_update(fields)?;
            SupportService::update_customer(&self.pool, customer_id, &update).await
        }
        .await;
        match settle("update_customer", result) {
            Some(true) => {
                tracing::info!(customer_id, "customer updated");
                true
            }
            Some(false) => {
                tracing::warn!(customer_id, "customer not found");
                false
            }
            None => false,
        }
    }

    pub async fn create_ticket(&self, customer_id: i64, issue: &str, priority: &str) -> Option<i64> {
        let preview: String = issue.chars().take(50).collect();
        tracing::info!(customer_id, priority, issue = %preview, "tool call: create_ticket");
        let result = async {
            let priority = ToolValidator::priority(priority)?;
            ToolValidator::issue(issue)?;
            SupportService::create_ticket(&self.pool, customer_id, issue, priority).await
        }
        .await;
        let ticket_id = settle("create_ticket", result)?;
        tracing::info!(customer_id, ticket_id, "ticket created");
        Some(ticket_id)
    }

    pub async fn get_customer_history(&self, customer_id: i64) -> Option<CustomerHistory> {
        tracing::info!(customer_id, "tool call: get_customer_history");
        let result = SupportService::customer_history(&self.pool, customer_id).await;
        let Some(history) = settle("get_customer_history", result)? else {
            tracing::warn!(customer_id, "customer not found");
            return None;
        };
        tracing::info!(
            customer_id,
            name = %history.customer.name,
            tickets = history.ticket_count,
            open = history.open_tickets,
            "customer history"
        );
        Some(history)
    }

    /// Tickets matching every given predicate; an invalid enum value yields an empty list.
    pub async fn get_tickets_by_criteria(
        &self,
        status: Option<&str>,
        priority: Option<&str>,
        customer_ids: Option<&[i64]>,
    ) -> Vec<Ticket> {
        tracing::debug!(status, priority, customer_ids = ?customer_ids, "get_tickets_by_criteria");
        let result = async {
            let criteria = ToolValidator::ticket_criteria(status, priority, customer_ids)?;
            SupportService::tickets_by_criteria(&self.pool, &criteria).await
        }
        .await;
        settle("get_tickets_by_criteria", result).unwrap_or_default()
    }

    pub async fn get_server_stats(&self) -> Option<ServerStats> {
        let result = SupportService::server_stats(&self.pool).await;
        settle("get_server_stats", result)
    }
}

/// Log a failed operation at a level matching its cause and drop the error.
fn settle<T>(tool: &'static str, result: Result<T, AppError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) if e.is_fault() => {
            tracing::error!(tool, error = %e, "tool failed");
            None
        }
        Err(e) => {
            tracing::warn!(tool, error = %e, "tool rejected");
            None
        }
    }
}
