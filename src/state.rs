//! Shared application state for all routes.

use crate::service::ToolGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: ToolGateway,
}
