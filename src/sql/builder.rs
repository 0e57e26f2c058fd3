//! Builds parameterized SELECT, INSERT and UPDATE statements for customers and tickets.

use crate::model::{CustomerStatus, CustomerUpdate, FieldChange, Priority, TicketCriteria};
use crate::sql::BindValue;

pub const CUSTOMERS_TABLE: &str = "customers";
pub const TICKETS_TABLE: &str = "tickets";

const CUSTOMER_COLUMNS: &[&str] = &["id", "name", "email", "phone", "status", "created_at", "updated_at"];
const TICKET_COLUMNS: &[&str] = &["id", "customer_id", "issue", "status", "priority", "created_at"];

/// Upper bound for list queries.
pub const MAX_LIST_LIMIT: u32 = 1000;

/// Quote identifier for SQLite (safe: only from the constants above).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_list(columns: &[&str]) -> String {
    columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<BindValue>) {
        self.params.push(v.into());
    }
}

/// SELECT one customer by id.
pub fn select_customer_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(id);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        column_list(CUSTOMER_COLUMNS),
        quoted(CUSTOMERS_TABLE),
        quoted("id")
    );
    q
}

/// SELECT customers, optionally filtered by exact status, ORDER BY id, LIMIT capped at [`MAX_LIST_LIMIT`].
pub fn select_customers(status: Option<CustomerStatus>, limit: u32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = match status {
        Some(s) => {
            q.push_param(s);
            format!(" WHERE {} = ?", quoted("status"))
        }
        None => String::new(),
    };
    q.push_param(i64::from(limit.min(MAX_LIST_LIMIT)));
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} LIMIT ?",
        column_list(CUSTOMER_COLUMNS),
        quoted(CUSTOMERS_TABLE),
        where_clause,
        quoted("id")
    );
    q
}

/// UPDATE customer by id: one SET per change plus `updated_at`. `None` when there is nothing to change.
pub fn update_customer(id: i64, update: &CustomerUpdate, updated_at: &str) -> Option<QueryBuf> {
    if update.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(update.changes().len() + 1);
    for change in update.changes() {
        sets.push(format!("{} = ?", quoted(change.field().column())));
        match change {
            FieldChange::Name(v) => q.push_param(v.clone()),
            FieldChange::Email(v) | FieldChange::Phone(v) => q.push_param(v.clone()),
            FieldChange::Status(s) => q.push_param(*s),
        }
    }
    sets.push(format!("{} = ?", quoted("updated_at")));
    q.push_param(updated_at);
    q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(CUSTOMERS_TABLE),
        sets.join(", "),
        quoted("id")
    );
    Some(q)
}

/// SELECT id for a customer id; the existence check before inserting a ticket.
pub fn customer_exists(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(id);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        quoted("id"),
        quoted(CUSTOMERS_TABLE),
        quoted("id")
    );
    q
}

/// INSERT a ticket. Status is always the literal 'open'.
pub fn insert_ticket(customer_id: i64, issue: &str, priority: Priority) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(customer_id);
    q.push_param(issue);
    q.push_param(priority);
    q.sql = format!(
        "INSERT INTO {} ({}, {}, {}, {}) VALUES (?, ?, 'open', ?)",
        quoted(TICKETS_TABLE),
        quoted("customer_id"),
        quoted("issue"),
        quoted("status"),
        quoted("priority")
    );
    q
}

/// SELECT tickets matching all given criteria, most recent first.
/// Customer id membership becomes `IN (?, ?, ...)`; an empty id list adds no predicate.
pub fn select_tickets(criteria: &TicketCriteria) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    if let Some(status) = criteria.status {
        q.push_param(status);
        where_parts.push(format!("{} = ?", quoted("status")));
    }
    if let Some(priority) = criteria.priority {
        q.push_param(priority);
        where_parts.push(format!("{} = ?", quoted("priority")));
    }
    if !criteria.customer_ids.is_empty() {
        let placeholders = vec!["?"; criteria.customer_ids.len()].join(", ");
        for id in &criteria.customer_ids {
            q.push_param(*id);
        }
        where_parts.push(format!("{} IN ({})", quoted("customer_id"), placeholders));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} DESC, {} DESC",
        column_list(TICKET_COLUMNS),
        quoted(TICKETS_TABLE),
        where_clause,
        quoted("created_at"),
        quoted("id")
    );
    q
}

/// SELECT every ticket of one customer, most recent first.
pub fn select_customer_tickets(customer_id: i64) -> QueryBuf {
    select_tickets(&TicketCriteria {
        customer_ids: vec![customer_id],
        ..TicketCriteria::default()
    })
}

/// Single-row aggregate for the server statistics.
pub fn select_server_stats() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT \
         (SELECT COUNT(*) FROM {c} WHERE status = 'active') AS active_customers, \
         (SELECT COUNT(*) FROM {c} WHERE status = 'disabled') AS disabled_customers, \
         (SELECT COUNT(*) FROM {t} WHERE status = 'open') AS open_tickets, \
         (SELECT COUNT(*) FROM {t} WHERE status = 'in_progress') AS in_progress_tickets, \
         (SELECT COUNT(*) FROM {t} WHERE priority = 'high') AS high_priority_tickets",
        c = quoted(CUSTOMERS_TABLE),
        t = quoted(TICKETS_TABLE)
    );
    q
}

/// `SELECT column, COUNT(*) ... GROUP BY column` over a whitelisted table/column pair.
pub fn count_grouped_by(table: &'static str, column: &'static str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {col}, COUNT(*) FROM {tbl} GROUP BY {col} ORDER BY {col}",
        col = quoted(column),
        tbl = quoted(table)
    );
    q
}
