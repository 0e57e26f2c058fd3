//! Customer and ticket records, their enumerated columns, and update payloads.

use crate::error::AppError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Storage format for timestamps; matches SQLite `CURRENT_TIMESTAMP`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Disabled,
}

impl CustomerStatus {
    pub const ALL: [CustomerStatus; 2] = [CustomerStatus::Active, CustomerStatus::Disabled];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Disabled => "disabled",
        }
    }
}

impl FromStr for CustomerStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CustomerStatus::Active),
            "disabled" => Ok(CustomerStatus::Disabled),
            _ => Err(AppError::Validation(format!(
                "invalid customer status: {} (expected active or disabled)",
                s
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [TicketStatus::Open, TicketStatus::InProgress, TicketStatus::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            _ => Err(AppError::Validation(format!(
                "invalid ticket status: {} (expected open, in_progress or resolved)",
                s
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(AppError::Validation(format!(
                "invalid priority: {} (expected low, medium or high)",
                s
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: CustomerStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Ticket {
    pub id: i64,
    pub customer_id: i64,
    pub issue: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub created_at: NaiveDateTime,
}

/// A customer with every ticket they own, most recent first, and counts derived from those tickets.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomerHistory {
    pub customer: Customer,
    pub tickets: Vec<Ticket>,
    pub ticket_count: usize,
    pub open_tickets: usize,
    pub high_priority_tickets: usize,
}

impl CustomerHistory {
    pub fn new(customer: Customer, tickets: Vec<Ticket>) -> Self {
        let open_tickets = tickets.iter().filter(|t| t.status == TicketStatus::Open).count();
        let high_priority_tickets = tickets.iter().filter(|t| t.priority == Priority::High).count();
        CustomerHistory {
            customer,
            ticket_count: tickets.len(),
            open_tickets,
            high_priority_tickets,
            tickets,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ServerStats {
    pub active_customers: i64,
    pub disabled_customers: i64,
    pub open_tickets: i64,
    pub in_progress_tickets: i64,
    pub high_priority_tickets: i64,
}

/// Ticket search predicates, AND-combined. An empty `customer_ids` means no customer filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketCriteria {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub customer_ids: Vec<i64>,
}

/// The customer columns a caller may change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CustomerField {
    Name,
    Email,
    Phone,
    Status,
}

impl CustomerField {
    /// Map an update key to its field; anything outside the whitelist is `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(CustomerField::Name),
            "email" => Some(CustomerField::Email),
            "phone" => Some(CustomerField::Phone),
            "status" => Some(CustomerField::Status),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::Email => "email",
            CustomerField::Phone => "phone",
            CustomerField::Status => "status",
        }
    }
}

/// One validated change to a customer column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldChange {
    Name(String),
    Email(Option<String>),
    Phone(Option<String>),
    Status(CustomerStatus),
}

impl FieldChange {
    pub fn field(&self) -> CustomerField {
        match self {
            FieldChange::Name(_) => CustomerField::Name,
            FieldChange::Email(_) => CustomerField::Email,
            FieldChange::Phone(_) => CustomerField::Phone,
            FieldChange::Status(_) => CustomerField::Status,
        }
    }
}

/// Validated set of customer changes; at most one change per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    changes: Vec<FieldChange>,
}

impl CustomerUpdate {
    pub fn new() -> Self {
        CustomerUpdate { changes: Vec::new() }
    }

    /// Add a change, replacing any earlier change to the same field.
    pub fn set(&mut self, change: FieldChange) {
        let field = change.field();
        match self.changes.iter_mut().find(|c| c.field() == field) {
            Some(existing) => *existing = change,
            None => self.changes.push(change),
        }
    }

    pub fn with(mut self, change: FieldChange) -> Self {
        self.set(change);
        self
    }

    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
