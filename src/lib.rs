//! Support tools: customer and support-ticket data access over SQLite, exposed as agent tools.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod tools;

pub use config::GatewayConfig;
pub use error::{AppError, ConfigError};
pub use model::{Customer, CustomerHistory, CustomerStatus, Priority, ServerStats, Ticket, TicketStatus};
pub use routes::{app, common_routes_with_ready, tool_routes};
pub use service::{SupportService, ToolGateway};
pub use state::AppState;
pub use store::{create_database, database_stats, open_existing, DatabaseStats};
pub use tools::{dispatch, tool_catalog};
