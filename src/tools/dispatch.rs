//! Route a named tool call with JSON arguments to the gateway and return the JSON result.
//! Only an unknown tool or malformed arguments produce an error; operation failures come
//! back as the tool's sentinel (`null`, `false` or `[]`).

use crate::error::AppError;
use crate::service::{ToolGateway, DEFAULT_LIST_LIMIT};
use crate::tools::ToolName;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct CustomerIdArgs {
    customer_id: i64,
}

#[derive(Debug, Deserialize)]
struct ListCustomersArgs {
    #[serde(default)]
    status: Option<String>,
    #[serde(default = "default_limit")]
    limit: i64,
}

#[derive(Debug, Deserialize)]
struct UpdateCustomerArgs {
    customer_id: i64,
    #[serde(alias = "data")]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct CreateTicketArgs {
    customer_id: i64,
    issue: String,
    #[serde(default = "default_priority")]
    priority: String,
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

fn default_priority() -> String {
    "medium".into()
}

/// A named call as an agent framework sends it.
#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

fn parse_args<T: DeserializeOwned>(tool: ToolName, arguments: Value) -> Result<T, AppError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        Value::Object(m) => Value::Object(m),
        _ => {
            return Err(AppError::BadRequest(format!(
                "arguments for {} must be a JSON object",
                tool.as_str()
            )))
        }
    };
    serde_json::from_value(arguments)
        .map_err(|e| AppError::BadRequest(format!("invalid arguments for {}: {}", tool.as_str(), e)))
}

fn to_json<T: serde::Serialize>(v: T) -> Result<Value, AppError> {
    serde_json::to_value(v).map_err(|e| AppError::BadRequest(format!("result not serializable: {}", e)))
}

pub async fn dispatch(gateway: &ToolGateway, name: &str, arguments: Value) -> Result<Value, AppError> {
    let tool: ToolName = name.parse()?;
    match tool {
        ToolName::GetCustomer => {
            let args: CustomerIdArgs = parse_args(tool, arguments)?;
            to_json(gateway.get_customer(args.customer_id).await)
        }
        ToolName::ListCustomers => {
            let args: ListCustomersArgs = parse_args(tool, arguments)?;
            to_json(gateway.list_customers(args.status.as_deref(), args.limit).await)
        }
        ToolName::UpdateCustomer => {
            let args: UpdateCustomerArgs = parse_args(tool, arguments)?;
            to_json(gateway.update_customer(args.customer_id, &args.fields).await)
        }
        ToolName::CreateTicket => {
            let args: CreateTicketArgs = parse_args(tool, arguments)?;
            to_json(gateway.create_ticket(args.customer_id, &args.issue, &args.priority).await)
        }
        ToolName::GetCustomerHistory => {
            let args: CustomerIdArgs = parse_args(tool, arguments)?;
            to_json(gateway.get_customer_history(args.customer_id).await)
        }
    }
}

pub async fn dispatch_call(gateway: &ToolGateway, call: ToolCall) -> Result<Value, AppError> {
    dispatch(gateway, &call.name, call.arguments).await
}
