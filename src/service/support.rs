//! Customer and ticket operations against SQLite, with typed errors.

use crate::error::AppError;
use crate::model::{now_timestamp, Customer, CustomerHistory, CustomerStatus, CustomerUpdate, Priority, ServerStats, Ticket, TicketCriteria};
use crate::sql::{
    customer_exists, insert_ticket, select_customer_by_id, select_customer_tickets, select_customers,
    select_server_stats, select_tickets, update_customer, QueryBuf,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

pub struct SupportService;

impl SupportService {
    /// Fetch one customer by id. Returns None when absent.
    pub async fn get_customer(pool: &SqlitePool, id: i64) -> Result<Option<Customer>, AppError> {
        let mut conn = pool.acquire().await?;
        Self::fetch_optional(&mut conn, &select_customer_by_id(id)).await
    }

    /// List customers ordered by id, optionally with an exact status match.
    pub async fn list_customers(
        pool: &SqlitePool,
        status: Option<CustomerStatus>,
        limit: u32,
    ) -> Result<Vec<Customer>, AppError> {
        let mut conn = pool.acquire().await?;
        Self::fetch_all(&mut conn, &select_customers(status, limit)).await
    }

    /// Apply the changes and stamp `updated_at`. Ok(false) when no customer has this id.
    pub async fn update_customer(pool: &SqlitePool, id: i64, update: &CustomerUpdate) -> Result<bool, AppError> {
        let q = update_customer(id, update, &now_timestamp())
            .ok_or_else(|| AppError::Validation("no valid fields to update".into()))?;
        let mut conn = pool.acquire().await?;
        let affected = Self::execute(&mut conn, &q).await?.rows_affected();
        Ok(affected > 0)
    }

    /// Insert an open ticket for an existing customer and return its id.
    /// The existence check and the insert share one IMMEDIATE transaction, so the write lock
    /// is held from the start and concurrent callers wait on the busy timeout.
    pub async fn create_ticket(
        pool: &SqlitePool,
        customer_id: i64,
        issue: &str,
        priority: Priority,
    ) -> Result<i64, AppError> {
        let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;
        let found: Option<(i64,)> = Self::fetch_optional(&mut tx, &customer_exists(customer_id)).await?;
        if found.is_none() {
            return Err(AppError::NotFound(format!("customer {}", customer_id)));
        }
        let ticket_id = Self::execute(&mut tx, &insert_ticket(customer_id, issue, priority))
            .await?
            .last_insert_rowid();
        tx.commit().await?;
        Ok(ticket_id)
    }

    /// Customer plus all their tickets (most recent first) and derived counts. None when the customer is absent.
    pub async fn customer_history(pool: &SqlitePool, id: i64) -> Result<Option<CustomerHistory>, AppError> {
        let mut conn = pool.acquire().await?;
        let Some(customer) = Self::fetch_optional::<Customer>(&mut conn, &select_customer_by_id(id)).await? else {
            return Ok(None);
        };
        let tickets = Self::fetch_all(&mut conn, &select_customer_tickets(id)).await?;
        Ok(Some(CustomerHistory::new(customer, tickets)))
    }

    pub async fn tickets_by_criteria(pool: &SqlitePool, criteria: &TicketCriteria) -> Result<Vec<Ticket>, AppError> {
        let mut conn = pool.acquire().await?;
        Self::fetch_all(&mut conn, &select_tickets(criteria)).await
    }

    pub async fn server_stats(pool: &SqlitePool) -> Result<ServerStats, AppError> {
        let mut conn = pool.acquire().await?;
        Self::fetch_optional(&mut conn, &select_server_stats())
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn fetch_optional<T>(conn: &mut SqliteConnection, q: &QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<Sqlite, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&mut *conn).await?)
    }

    async fn fetch_all<T>(conn: &mut SqliteConnection, q: &QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<Sqlite, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&mut *conn).await?)
    }

    async fn execute(
        conn: &mut SqliteConnection,
        q: &QueryBuf,
    ) -> Result<sqlx::sqlite::SqliteQueryResult, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.execute(&mut *conn).await?)
    }
}
