//! Row identity derivation.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::Value;

/// Stable key of a displayed row, used for selection bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl RowId {
    /// Identity carried by a field value. Null carries none.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Int(n) => Some(Self::Number(*n)),
            Value::Float(_) => Some(match value.as_i64() {
                Some(n) => Self::Number(n),
                None => Self::Text(value.to_string()),
            }),
            Value::Bool(_) | Value::Text(_) => Some(Self::Text(value.to_string())),
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// Function deriving an identity from a record.
pub type RowKeyFn<T> = Arc<dyn Fn(&T) -> RowId + Send + Sync>;

/// How a row's identity is derived.
pub enum RowKey<T> {
    /// Read the named field; rows where it is null fall back to their
    /// position in the sequence being resolved.
    Field(String),
    /// Ask a caller-supplied function. No fallback.
    Func(RowKeyFn<T>),
}

impl<T> RowKey<T> {
    /// Key rows by the named field.
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Key rows with a function of the record.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&T) -> RowId + Send + Sync + 'static,
    {
        Self::Func(Arc::new(f))
    }

    /// Resolve the identity of `record` found at `index`.
    pub fn resolve(&self, record: &T, index: usize) -> RowId
    where
        T: Record,
    {
        match self {
            Self::Field(name) => RowId::from_value(&record.field(name))
                .unwrap_or(RowId::Number(index as i64)),
            Self::Func(f) => f(record),
        }
    }
}

impl<T> Default for RowKey<T> {
    fn default() -> Self {
        Self::Field("id".to_string())
    }
}

impl<T> Clone for RowKey<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(name) => Self::Field(name.clone()),
            Self::Func(f) => Self::Func(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for RowKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}
