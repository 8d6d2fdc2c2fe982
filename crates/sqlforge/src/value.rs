//! Bind values and abstract database type tags.
//!
//! [`SqlValue`] is the owned value a parameter carries until an external
//! executor binds it to a concrete driver; [`DbType`] is the vendor-neutral
//! type hint handed along with it. Nullability is expressed through
//! [`SqlValue::Null`] rather than separate nullable type tags.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

/// Abstract database type tag attached to a parameter as a driver hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    /// 16-bit integer
    SmallInt,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    BigInt,
    /// 32-bit floating point
    Real,
    /// 64-bit floating point
    Double,
    /// Exact decimal
    Decimal,
    /// Boolean
    Bool,
    /// Variable-length string
    Text,
    /// Fixed-length character string
    Char,
    /// GUID / UUID
    Uuid,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Date and time without offset
    DateTime,
    /// Date and time with UTC offset
    DateTimeOffset,
    /// Raw bytes
    Binary,
    /// JSON document
    Json,
}

/// A value bound to a parameter placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// The null sentinel
    Null,
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DateTimeTz(DateTime<FixedOffset>),
    Json(serde_json::Value),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
}

impl SqlValue {
    /// Whether this value is the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// The type tag implied by this value, if any.
    ///
    /// `Null` carries no hint; callers that need one must supply it
    /// explicitly.
    pub fn db_type(&self) -> Option<DbType> {
        match self {
            SqlValue::Null => None,
            SqlValue::I16(_) => Some(DbType::SmallInt),
            SqlValue::I32(_) => Some(DbType::Int),
            SqlValue::I64(_) => Some(DbType::BigInt),
            SqlValue::F32(_) => Some(DbType::Real),
            SqlValue::F64(_) => Some(DbType::Double),
            SqlValue::Bool(_) => Some(DbType::Bool),
            SqlValue::Str(_) => Some(DbType::Text),
            SqlValue::Bytes(_) => Some(DbType::Binary),
            SqlValue::Uuid(_) => Some(DbType::Uuid),
            SqlValue::Date(_) => Some(DbType::Date),
            SqlValue::Time(_) => Some(DbType::Time),
            SqlValue::DateTime(_) => Some(DbType::DateTime),
            SqlValue::DateTimeTz(_) => Some(DbType::DateTimeOffset),
            SqlValue::Json(_) => Some(DbType::Json),
            #[cfg(feature = "rust_decimal")]
            SqlValue::Decimal(_) => Some(DbType::Decimal),
        }
    }
}

// ---- From impls ----

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        SqlValue::I16(v)
    }
}
impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::I32(v)
    }
}
impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}
impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        SqlValue::F32(v)
    }
}
impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::F64(v)
    }
}
impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}
impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Str(v.to_string())
    }
}
impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Str(v)
    }
}
impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        SqlValue::Str(v.clone())
    }
}
impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(v)
    }
}
impl From<&[u8]> for SqlValue {
    fn from(v: &[u8]) -> Self {
        SqlValue::Bytes(v.to_vec())
    }
}
impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        SqlValue::Uuid(v)
    }
}
impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}
impl From<NaiveTime> for SqlValue {
    fn from(v: NaiveTime) -> Self {
        SqlValue::Time(v)
    }
}
impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::DateTime(v)
    }
}
impl From<DateTime<FixedOffset>> for SqlValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        SqlValue::DateTimeTz(v)
    }
}
impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::DateTimeTz(v.fixed_offset())
    }
}
impl From<serde_json::Value> for SqlValue {
    fn from(v: serde_json::Value) -> Self {
        SqlValue::Json(v)
    }
}
#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for SqlValue {
    fn from(v: rust_decimal::Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}
