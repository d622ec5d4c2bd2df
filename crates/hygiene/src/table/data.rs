//! The in-memory table.

use std::collections::HashSet;

use serde::Serialize;

use super::column::Column;
use super::value::Value;
use crate::error::{HygieneError, Result};

/// An ordered set of named, equal-length columns.
///
/// Rows are aligned by position across columns. The fields are public so a
/// table can be assembled by hand; [`Table::validate`] checks the contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    /// Columns in table order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table, checking that column lengths and names are consistent.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let table = Self { columns };
        table.validate()?;
        Ok(table)
    }

    /// Build a table from row-major values, inferring each column's type.
    pub fn from_rows<S: AsRef<str>>(headers: &[S], rows: Vec<Vec<Value>>) -> Result<Self> {
        let width = headers.len();
        let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); width];

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(HygieneError::InvalidInput(format!(
                    "row {} has {} values, expected {}",
                    row_idx,
                    row.len(),
                    width
                )));
            }
            for (col, value) in columns.iter_mut().zip(row) {
                col.push(value);
            }
        }

        let columns = headers
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::from_values(name.as_ref(), values))
            .collect::<Result<Vec<_>>>()?;

        Self::new(columns)
    }

    /// Check the table contract: unique column names and equal column lengths.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(HygieneError::InvalidInput(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }

        if let Some(first) = self.columns.first() {
            let expected = first.len();
            if let Some(bad) = self.columns.iter().find(|c| c.len() != expected) {
                return Err(HygieneError::InvalidInput(format!(
                    "column '{}' has {} values but column '{}' has {}",
                    bad.name,
                    bad.len(),
                    first.name,
                    expected
                )));
            }
        }

        Ok(())
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.columns.get(col).and_then(|c| c.values.get(row))
    }

    /// Get one row as a tuple of value references.
    ///
    /// Returns `None` when any column is too short to hold the row.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.row_count() {
            return None;
        }
        self.columns.iter().map(|c| c.values.get(index)).collect()
    }

    /// Iterate over rows in order, stopping at the first incomplete row.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.row_count()).map_while(move |i| self.row(i))
    }

    /// Build a new table holding only the given rows, in the given order.
    ///
    /// Column names and types are kept. Out-of-range indices are skipped.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = indices
                    .iter()
                    .filter_map(|&i| c.values.get(i).cloned())
                    .collect();
                Column::new(c.name.clone(), c.column_type, values)
            })
            .collect();
        Table { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnType;

    fn sample() -> Table {
        Table::from_rows(
            &["id", "name"],
            vec![
                vec![1i64.into(), "a".into()],
                vec![2i64.into(), Value::Missing],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows() {
        let table = sample();
        assert_eq!(table.column_names(), vec!["id", "name"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[0].column_type, ColumnType::Integer);
        assert_eq!(table.columns[1].column_type, ColumnType::Text);
        assert_eq!(table.get(1, 1), Some(&Value::Missing));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let result = Table::from_rows(&["a", "b"], vec![vec![1i64.into()]]);
        assert!(matches!(result, Err(HygieneError::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_unequal_columns() {
        let result = Table::new(vec![
            Column::new("a", ColumnType::Integer, vec![1i64.into(), 2i64.into()]),
            Column::new("b", ColumnType::Integer, vec![1i64.into()]),
        ]);
        assert!(matches!(result, Err(HygieneError::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let result = Table::new(vec![
            Column::new("a", ColumnType::Integer, vec![]),
            Column::new("a", ColumnType::Text, vec![]),
        ]);
        assert!(matches!(result, Err(HygieneError::InvalidInput(_))));
    }

    #[test]
    fn test_rows_and_select() {
        let table = sample();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![&Value::Integer(1), &Value::text("a")]);

        let picked = table.select_rows(&[1]);
        assert_eq!(picked.row_count(), 1);
        assert_eq!(picked.row(0), table.row(1));
        assert_eq!(picked.columns[1].column_type, ColumnType::Text);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
        assert!(table.validate().is_ok());
        assert_eq!(table.row(0), None);
    }

    #[test]
    fn test_ragged_rows_do_not_panic() {
        let table = Table {
            columns: vec![
                Column::new("a", ColumnType::Integer, vec![1i64.into(), 2i64.into()]),
                Column::new("b", ColumnType::Integer, vec![1i64.into()]),
            ],
        };

        assert_eq!(table.row(1), None);
        assert_eq!(table.rows().count(), 1);
    }
}
