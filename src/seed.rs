//! Fixed demonstration dataset written by the initializer.

use crate::error::AppError;
use crate::model::{CustomerStatus, Priority, TicketStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::model::CustomerStatus::{Active, Disabled};
use crate::model::Priority::{High, Low, Medium};
use crate::model::TicketStatus::{InProgress, Open, Resolved};

pub struct SeedCustomer {
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub status: CustomerStatus,
}

pub struct SeedTicket {
    pub customer_id: i64,
    pub issue: &'static str,
    pub status: TicketStatus,
    pub priority: Priority,
}

const fn customer(
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    status: CustomerStatus,
) -> SeedCustomer {
    SeedCustomer { name, email, phone, status }
}

const fn ticket(customer_id: i64, issue: &'static str, status: TicketStatus, priority: Priority) -> SeedTicket {
    SeedTicket { customer_id, issue, status, priority }
}

/// Inserted in order, so row N gets id N on a fresh database.
pub const SEED_CUSTOMERS: &[SeedCustomer] = &[
    customer("Alice Johnson", "alice.johnson@email.com", "+1-555-0101", Active),
    customer("Bob Martinez", "bob.martinez@company.com", "+1-555-0202", Active),
    customer("Carol White", "carol.white@mail.com", "+1-555-0303", Active),
    customer("David Brown", "david.b@enterprise.com", "+1-555-0404", Active),
    customer("Emma Davis", "emma.davis@startup.io", "+1-555-0505", Active),
    customer("Frank Wilson", "frank.w@inactive.com", "+1-555-0606", Disabled),
    customer("Grace Lee", "grace.lee@premium.com", "+1-555-0707", Active),
    customer("Henry Chen", "henry.chen@tech.com", "+1-555-0808", Active),
    customer("Iris Rodriguez", "iris.r@finance.com", "+1-555-0909", Active),
    customer("Jack Taylor", "jack.taylor@small.biz", "+1-555-1010", Active),
];

pub const SEED_TICKETS: &[SeedTicket] = &[
    ticket(1, "Product not working as expected", Open, High),
    ticket(1, "Need help with account settings", InProgress, Medium),
    ticket(1, "Billing question about last invoice", Resolved, Low),
    ticket(2, "System integration issues", Open, High),
    ticket(2, "API rate limit concerns", InProgress, High),
    ticket(3, "How do I reset my password?", Resolved, Low),
    ticket(4, "Data export not working", Open, High),
    ticket(4, "Feature request: bulk operations", Open, Medium),
    ticket(4, "Documentation unclear", InProgress, Low),
    ticket(5, "Getting started questions", Resolved, Low),
    // Frank (6) is disabled and has no tickets.
    ticket(7, "Critical: Service outage affecting business", Open, High),
    ticket(7, "Need compensation for downtime", Open, High),
    ticket(8, "Performance degradation", InProgress, Medium),
    ticket(9, "Double charged on subscription", Open, High),
    ticket(9, "Need refund urgently", Open, High),
    ticket(10, "Product inquiry", Resolved, Low),
];

/// Batch-insert the seed rows. Returns (customers, tickets) inserted.
pub async fn insert_seed_data(conn: &mut SqliteConnection) -> Result<(u64, u64), AppError> {
    let mut customers: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT INTO customers (name, email, phone, status) ");
    customers.push_values(SEED_CUSTOMERS.iter(), |mut b, c| {
        b.push_bind(c.name)
            .push_bind(c.email)
            .push_bind(c.phone)
            .push_bind(c.status.as_str());
    });
    let customer_rows = customers.build().execute(&mut *conn).await?.rows_affected();

    let mut tickets: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT INTO tickets (customer_id, issue, status, priority) ");
    tickets.push_values(SEED_TICKETS.iter(), |mut b, t| {
        b.push_bind(t.customer_id)
            .push_bind(t.issue)
            .push_bind(t.status.as_str())
            .push_bind(t.priority.as_str());
    });
    let ticket_rows = tickets.build().execute(&mut *conn).await?.rows_affected();

    tracing::info!(customers = customer_rows, tickets = ticket_rows, "inserted seed data");
    Ok((customer_rows, ticket_rows))
}
