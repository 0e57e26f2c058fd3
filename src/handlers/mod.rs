//! HTTP handlers for tool calls and the read-only ticket helpers.

pub mod tickets;
pub mod tools;
pub use tickets::*;
pub use tools::*;
