//! Extract the calling agent's name from the request (X-Agent-Name header).

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

/// Header an agent framework may set to identify itself in tool-call logs.
pub const AGENT_NAME_HEADER: &str = "X-Agent-Name";

/// Extractor for the optional agent name.
#[derive(Clone, Debug)]
pub struct CallerAgent(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for CallerAgent
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AGENT_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(CallerAgent(value))
    }
}
