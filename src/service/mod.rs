//! SupportService: typed customer/ticket operations. ToolGateway: the sentinel-returning tool façade.

mod gateway;
mod support;
mod validation;
pub use gateway::{ToolGateway, DEFAULT_LIST_LIMIT};
pub use support::SupportService;
pub use validation::ToolValidator;
