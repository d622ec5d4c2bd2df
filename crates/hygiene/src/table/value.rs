//! Cell values.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::types::ColumnType;

/// A single cell of a [`Table`](super::Table).
///
/// `Missing` is the explicit missing marker. It is never equal to an empty
/// `Text` or to a zero.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value (serializes as `null`).
    Missing,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl Value {
    /// Shorthand for a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Returns true if this is the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The column type this value naturally belongs to.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Missing => ColumnType::Missing,
            Value::Integer(_) => ColumnType::Integer,
            Value::Float(_) => ColumnType::Float,
            Value::Boolean(_) => ColumnType::Boolean,
            Value::Text(_) => ColumnType::Text,
        }
    }

    /// Check whether this value may live in a column of the given type.
    ///
    /// Missing fits every column type.
    pub fn conforms_to(&self, column_type: ColumnType) -> bool {
        self.is_missing() || self.column_type() == column_type
    }

    /// Bit pattern used for float equality and hashing.
    ///
    /// `-0.0` is folded into `0.0` and every NaN into one canonical NaN.
    fn float_key(f: f64) -> u64 {
        if f == 0.0 {
            0.0f64.to_bits()
        } else if f.is_nan() {
            f64::NAN.to_bits()
        } else {
            f.to_bits()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Missing, Value::Missing) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => Value::float_key(*a) == Value::float_key(*b),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Missing => {}
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => Value::float_key(*f).hash(state),
            Value::Boolean(b) => b.hash(state),
            Value::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            // Keep a trailing ".0" so integral floats read back as floats
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Boolean(true) => write!(f, "True"),
            Value::Boolean(false) => write!(f, "False"),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Missing)
    }
}
