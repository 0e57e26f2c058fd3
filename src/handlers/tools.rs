//! Tool handlers: catalog listing and named tool calls.

use crate::error::AppError;
use crate::extractors::CallerAgent;
use crate::response::{success_many, success_one_ok};
use crate::state::AppState;
use crate::tools::{dispatch, dispatch_call, tool_catalog, ToolCall};
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde_json::Value;

/// Empty body means "no arguments".
fn body_to_value(body: &[u8]) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("body must be JSON: {}", e)))
}

/// GET /api/v1/tools: the tool catalog.
pub async fn list_tools() -> impl axum::response::IntoResponse {
    success_many(tool_catalog())
}

/// POST /api/v1/tools/:name: body is the tool's argument object.
pub async fn call_tool(
    CallerAgent(agent): CallerAgent,
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let arguments = body_to_value(&body)?;
    tracing::debug!(tool = %name, agent = agent.as_deref().unwrap_or("-"), "tool request");
    let result = dispatch(&state.gateway, &name, arguments).await?;
    Ok(success_one_ok(result))
}

/// POST /api/v1/tools: body is `{ "name": ..., "arguments": {...} }`.
pub async fn call_tool_envelope(
    CallerAgent(agent): CallerAgent,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let call: ToolCall = serde_json::from_value(body_to_value(&body)?)
        .map_err(|e| AppError::BadRequest(format!("invalid tool call: {}", e)))?;
    tracing::debug!(tool = %call.name, agent = agent.as_deref().unwrap_or("-"), "tool request");
    let result = dispatch_call(&state.gateway, call).await?;
    Ok(success_one_ok(result))
}
