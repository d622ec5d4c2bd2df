//! Named, typed columns.

use std::collections::HashSet;

use serde::Serialize;

use super::types::ColumnType;
use super::value::Value;
use crate::error::{HygieneError, Result};

/// A named sequence of values sharing one declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Column name (from the header row when loaded from a file).
    pub name: String,
    /// Declared type of every non-missing value.
    pub column_type: ColumnType,
    /// Values in row order.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column with an explicit type.
    ///
    /// The values are not checked against the type here; the analyzer does
    /// that before each inspection.
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    /// Create a column whose type is taken from its non-missing values.
    ///
    /// A mix of integers and floats is widened to `Float`. Any other mix of
    /// value kinds is rejected.
    pub fn from_values(name: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        let kinds: HashSet<ColumnType> = values
            .iter()
            .filter(|v| !v.is_missing())
            .map(Value::column_type)
            .collect();

        let column_type = match kinds.len() {
            0 => ColumnType::Missing,
            1 => kinds.into_iter().next().unwrap_or_default(),
            2 if kinds.contains(&ColumnType::Integer) && kinds.contains(&ColumnType::Float) => {
                ColumnType::Float
            }
            _ => {
                return Err(HygieneError::InvalidInput(format!(
                    "column '{}' mixes values of different types",
                    name
                )));
            }
        };

        let values = if column_type == ColumnType::Float {
            values
                .into_iter()
                .map(|v| match v {
                    Value::Integer(i) => Value::Float(i as f64),
                    other => other,
                })
                .collect()
        } else {
            values
        };

        Ok(Self::new(name, column_type, values))
    }

    /// Number of entries, missing included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing entries.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Number of distinct values. All missing entries together count as one class.
    pub fn unique_count(&self) -> usize {
        self.values.iter().collect::<HashSet<_>>().len()
    }

    /// Find the first value that does not fit the declared type.
    pub fn first_nonconforming(&self) -> Option<(usize, &Value)> {
        self.values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.conforms_to(self.column_type))
    }
}
