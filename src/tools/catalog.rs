//! Tool names and their input descriptions for agent frameworks.

use crate::error::AppError;
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetCustomer,
    ListCustomers,
    UpdateCustomer,
    CreateTicket,
    GetCustomerHistory,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::GetCustomer,
        ToolName::ListCustomers,
        ToolName::UpdateCustomer,
        ToolName::CreateTicket,
        ToolName::GetCustomerHistory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetCustomer => "get_customer",
            ToolName::ListCustomers => "list_customers",
            ToolName::UpdateCustomer => "update_customer",
            ToolName::CreateTicket => "create_ticket",
            ToolName::GetCustomerHistory => "get_customer_history",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ToolName::GetCustomer => "Get a customer by id. Returns null when no customer has that id.",
            ToolName::ListCustomers => {
                "List customers ordered by id, optionally filtered by status (active or disabled)."
            }
            ToolName::UpdateCustomer => {
                "Update a customer's name, email, phone or status. Other fields are ignored. Returns true on success."
            }
            ToolName::CreateTicket => {
                "Open a support ticket for an existing customer. Returns the new ticket id, or null on failure."
            }
            ToolName::GetCustomerHistory => {
                "Get a customer with all their tickets (most recent first) and open/high-priority counts."
            }
        }
    }

    fn input_schema(&self) -> Value {
        let customer_id = json!({ "type": "integer", "description": "Customer id" });
        match self {
            ToolName::GetCustomer | ToolName::GetCustomerHistory => json!({
                "type": "object",
                "properties": { "customer_id": customer_id },
                "required": ["customer_id"]
            }),
            ToolName::ListCustomers => json!({
                "type": "object",
                "properties": {
                    "status": { "type": "string", "enum": ["active", "disabled"] },
                    "limit": { "type": "integer", "minimum": 0, "default": 10 }
                }
            }),
            ToolName::UpdateCustomer => json!({
                "type": "object",
                "properties": {
                    "customer_id": customer_id,
                    "fields": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "email": { "type": ["string", "null"] },
                            "phone": { "type": ["string", "null"] },
                            "status": { "type": "string", "enum": ["active", "disabled"] }
                        }
                    }
                },
                "required": ["customer_id", "fields"]
            }),
            ToolName::CreateTicket => json!({
                "type": "object",
                "properties": {
                    "customer_id": customer_id,
                    "issue": { "type": "string" },
                    "priority": { "type": "string", "enum": ["low", "medium", "high"], "default": "medium" }
                },
                "required": ["customer_id", "issue"]
            }),
        }
    }
}

impl FromStr for ToolName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::NotFound(format!("tool {}", s)))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn tool_catalog() -> Vec<ToolSpec> {
    ToolName::ALL
        .iter()
        .map(|t| ToolSpec {
            name: t.as_str(),
            description: t.description(),
            input_schema: t.input_schema(),
        })
        .collect()
}
