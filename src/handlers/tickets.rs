//! Read-only helpers: multi-criteria ticket search and server statistics.

use crate::error::AppError;
use crate::response::{success_many, success_one_ok};
use crate::state::AppState;
use axum::extract::{Query, State};
use std::collections::HashMap;

/// Parse `customer_ids=1,2,3`. Blank segments are skipped.
fn parse_customer_ids(s: &str) -> Result<Vec<i64>, AppError> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("invalid customer id: {}", p)))
        })
        .collect()
}

/// GET /api/v1/tickets?status=&priority=&customer_ids=
pub async fn search_tickets(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let customer_ids = params
        .get("customer_ids")
        .map(|s| parse_customer_ids(s))
        .transpose()?;
    let tickets = state
        .gateway
        .get_tickets_by_criteria(
            params.get("status").map(String::as_str),
            params.get("priority").map(String::as_str),
            customer_ids.as_deref(),
        )
        .await;
    Ok(success_many(tickets))
}

/// GET /api/v1/stats: `data` is null when the statistics query fails.
pub async fn server_stats(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    success_one_ok(state.gateway.get_server_stats().await)
}
