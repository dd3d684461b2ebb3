//! Typed column values for dialect-aware SQL literal generation.
//!
//! Cloud Spanner column values arrive through the row source as one of a
//! closed set of base types, each of which may independently be NULL, plus
//! arrays of any base type. Modeling validity as an `Option` inside each
//! variant keeps NULL handling exhaustiveness-checked at compile time
//! instead of relying on runtime type inspection.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};

/// A single typed column value, possibly NULL.
///
/// A `None` payload of any variant encodes as the SQL token `NULL`; a
/// present-but-empty array (`Array(Some(vec![]))`) is distinct from a NULL
/// array (`Array(None)`).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// BOOL value.
    Bool(Option<bool>),

    /// INT64 value.
    Int64(Option<i64>),

    /// FLOAT64 value (IEEE-754 double, including NaN and infinities).
    Float64(Option<f64>),

    /// STRING value.
    String(Option<String>),

    /// BYTES value.
    Bytes(Option<Vec<u8>>),

    /// TIMESTAMP value (always UTC).
    Timestamp(Option<DateTime<Utc>>),

    /// DATE value (calendar date, no time component).
    Date(Option<NaiveDate>),

    /// NUMERIC value (exact decimal, 29 integer / 9 fraction digits).
    Numeric(Option<BigDecimal>),

    /// JSON value. `Json(Some(serde_json::Value::Null))` is a present JSON
    /// `null` payload, not a SQL NULL.
    Json(Option<serde_json::Value>),

    /// ARRAY value of any element type.
    Array(Option<Vec<Value>>),
}

/// One fetched database record: column values in table column order.
pub type Row = Vec<Value>;

impl Value {
    /// Check if this value is SQL NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Value::Bool(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::String(v) => v.is_none(),
            Value::Bytes(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Numeric(v) => v.is_none(),
            Value::Json(v) => v.is_none(),
            Value::Array(v) => v.is_none(),
        }
    }

    /// Name of the Spanner type this value carries.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "BOOL",
            Value::Int64(_) => "INT64",
            Value::Float64(_) => "FLOAT64",
            Value::String(_) => "STRING",
            Value::Bytes(_) => "BYTES",
            Value::Timestamp(_) => "TIMESTAMP",
            Value::Date(_) => "DATE",
            Value::Numeric(_) => "NUMERIC",
            Value::Json(_) => "JSON",
            Value::Array(_) => "ARRAY",
        }
    }
}

// From implementations for common non-null cases
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(Some(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(Some(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(Some(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(Some(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(Some(v.to_string()))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(Some(v))
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(Some(v.to_vec()))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(Some(v))
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(Some(v))
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::Numeric(Some(v))
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(Some(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null() {
        assert!(Value::Bool(None).is_null());
        assert!(Value::Array(None).is_null());
        assert!(!Value::Int64(Some(42)).is_null());
        // An empty array is present, not NULL
        assert!(!Value::Array(Some(vec![])).is_null());
    }

    #[test]
    fn test_json_null_payload_is_not_sql_null() {
        assert!(!Value::Json(Some(serde_json::Value::Null)).is_null());
        assert!(Value::Json(None).is_null());
    }

    #[test]
    fn test_from_implementations() {
        let v: Value = 42i64.into();
        assert_eq!(v, Value::Int64(Some(42)));

        let v: Value = "hello".into();
        assert_eq!(v, Value::String(Some("hello".to_string())));

        let v: Value = vec![Value::from(true)].into();
        assert_eq!(v, Value::Array(Some(vec![Value::Bool(Some(true))])));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Float64(None).type_name(), "FLOAT64");
        assert_eq!(Value::Array(Some(vec![])).type_name(), "ARRAY");
    }
}
