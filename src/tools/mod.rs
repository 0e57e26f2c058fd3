//! JSON tool-call surface over the gateway.

mod catalog;
mod dispatch;
pub use catalog::{tool_catalog, ToolName, ToolSpec};
pub use dispatch::{dispatch, dispatch_call, ToolCall};
