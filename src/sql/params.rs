//! Values that the statement builder binds as SQLite parameters.

use crate::model::{CustomerStatus, Priority, TicketStatus};
use sqlx::encode::{Encode, IsNull};
use sqlx::sqlite::{Sqlite, SqliteTypeInfo};
use sqlx::Database;

/// A value that can be bound to a SQLite query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    Null,
    I64(i64),
    Text(String),
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        BindValue::I64(n)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::Text(s)
    }
}

impl From<Option<String>> for BindValue {
    fn from(v: Option<String>) -> Self {
        v.map(BindValue::Text).unwrap_or(BindValue::Null)
    }
}

impl From<CustomerStatus> for BindValue {
    fn from(s: CustomerStatus) -> Self {
        BindValue::from(s.as_str())
    }
}

impl From<TicketStatus> for BindValue {
    fn from(s: TicketStatus) -> Self {
        BindValue::from(s.as_str())
    }
}

impl From<Priority> for BindValue {
    fn from(p: Priority) -> Self {
        BindValue::from(p.as_str())
    }
}

impl<'q> Encode<'q, Sqlite> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            BindValue::Null => <Option<i64> as Encode<Sqlite>>::encode_by_ref(&None, buf),
            BindValue::I64(n) => <i64 as Encode<Sqlite>>::encode_by_ref(n, buf),
            BindValue::Text(s) => <String as Encode<Sqlite>>::encode_by_ref(s, buf),
        }
    }
}

impl sqlx::Type<Sqlite> for BindValue {
    fn type_info() -> SqliteTypeInfo {
        <String as sqlx::Type<Sqlite>>::type_info()
    }
}
