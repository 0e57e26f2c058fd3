//! Probes: liveness, readiness against the support database, and build info.

use crate::state::AppState;
use crate::tools::ToolName;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
struct Probe {
    status: &'static str,
    database: &'static str,
    tools: usize,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 503 until the pool answers a trivial query.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Probe>) {
    let tools = ToolName::ALL.len();
    match sqlx::query("SELECT 1").execute(state.gateway.pool()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(Probe {
                status: "ok",
                database: "ok",
                tools,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Probe {
                    status: "degraded",
                    database: "unavailable",
                    tools,
                }),
            )
        }
    }
}

async fn version() -> Json<Value> {
    let tools: Vec<&str> = ToolName::ALL.iter().map(ToolName::as_str).collect();
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "tools": tools,
    }))
}

/// `/health`, `/ready` and `/version` at the root.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
