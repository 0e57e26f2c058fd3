//! Tool routes and the full application router.

use crate::handlers::{call_tool, call_tool_envelope, list_tools, search_tickets, server_stats};
use crate::routes::common_routes_with_ready;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub fn tool_routes(state: AppState) -> Router {
    Router::new()
        .route("/tools", get(list_tools).post(call_tool_envelope))
        .route("/tools/:name", axum::routing::post(call_tool))
        .route("/tickets", get(search_tickets))
        .route("/stats", get(server_stats))
        .with_state(state)
}

/// Probes at the root, tools under /api/v1, request tracing and a body size limit.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api/v1", tool_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}
