//! Tool input validation. Runs before any storage access.

use crate::error::AppError;
use crate::model::{CustomerStatus, CustomerField, CustomerUpdate, FieldChange, Priority, TicketCriteria, TicketStatus};
use crate::sql::MAX_LIST_LIMIT;
use serde_json::{Map, Value};

pub struct ToolValidator;

impl ToolValidator {
    /// Build a customer update from a field map. Keys outside the whitelist are ignored;
    /// values of whitelisted keys must have the right shape. Fails when nothing applicable remains.
    pub fn customer_update(fields: &Map<String, Value>) -> Result<CustomerUpdate, AppError> {
        let mut update = CustomerUpdate::new();
        for (key, value) in fields {
            let Some(field) = CustomerField::from_key(key) else { continue };
            let change = match field {
                CustomerField::Name => FieldChange::Name(required_text(key, value)?),
                CustomerField::Email => FieldChange::Email(optional_text(key, value)?),
                CustomerField::Phone => FieldChange::Phone(optional_text(key, value)?),
                CustomerField::Status => FieldChange::Status(Self::customer_status(&required_text(key, value)?)?),
            };
            update.set(change);
        }
        if update.is_empty() {
            return Err(AppError::Validation("no valid fields to update".into()));
        }
        Ok(update)
    }

    pub fn customer_status(s: &str) -> Result<CustomerStatus, AppError> {
        s.parse()
    }

    /// Optional status filter. An empty value means no filter.
    pub fn customer_status_filter(status: Option<&str>) -> Result<Option<CustomerStatus>, AppError> {
        non_empty(status).map(Self::customer_status).transpose()
    }

    pub fn ticket_status(s: &str) -> Result<TicketStatus, AppError> {
        s.parse()
    }

    pub fn priority(s: &str) -> Result<Priority, AppError> {
        s.parse()
    }

    /// Issue text must contain something other than whitespace.
    pub fn issue(s: &str) -> Result<(), AppError> {
        if s.trim().is_empty() {
            return Err(AppError::Validation("issue is required".into()));
        }
        Ok(())
    }

    /// Non-negative limit, capped at [`MAX_LIST_LIMIT`].
    pub fn limit(n: i64) -> Result<u32, AppError> {
        if n < 0 {
            return Err(AppError::Validation(format!("limit must be at least 0, got {}", n)));
        }
        Ok(n.min(i64::from(MAX_LIST_LIMIT)) as u32)
    }

    pub fn ticket_criteria(
        status: Option<&str>,
        priority: Option<&str>,
        customer_ids: Option<&[i64]>,
    ) -> Result<TicketCriteria, AppError> {
        Ok(TicketCriteria {
            status: non_empty(status).map(Self::ticket_status).transpose()?,
            priority: non_empty(priority).map(Self::priority).transpose()?,
            customer_ids: customer_ids.map(<[i64]>::to_vec).unwrap_or_default(),
        })
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn required_text(key: &str, v: &Value) -> Result<String, AppError> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => Err(AppError::Validation(format!("{} must not be empty", key))),
        _ => Err(AppError::Validation(format!("{} must be a string", key))),
    }
}

fn optional_text(key: &str, v: &Value) -> Result<Option<String>, AppError> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(AppError::Validation(format!("{} must be a string or null", key))),
    }
}
