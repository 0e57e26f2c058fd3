//! Router assembly: common probes plus the tool surface.

pub mod common;
pub mod tools;
pub use common::common_routes_with_ready;
pub use tools::{app, tool_routes};
