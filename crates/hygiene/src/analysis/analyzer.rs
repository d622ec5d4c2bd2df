//! The hygiene analyzer: missing values, duplicate rows, column types.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, info};

use super::report::{ColumnStat, HygieneReport, MissingValueReport};
use crate::error::{HygieneError, Result};
use crate::table::{Column, Table};

/// Runs hygiene checks over a borrowed table.
///
/// Every check is a pure query: it never modifies the table, can be called any
/// number of times in any order, and returns a fresh result. A failed check
/// leaves the analyzer usable.
///
/// ```
/// use hygiene::{HygieneAnalyzer, Table, Value};
///
/// let table = Table::from_rows(
///     &["id", "name"],
///     vec![
///         vec![1i64.into(), "a".into()],
///         vec![1i64.into(), "a".into()],
///         vec![2i64.into(), Value::Missing],
///     ],
/// )
/// .unwrap();
///
/// let analyzer = HygieneAnalyzer::new(&table).unwrap();
/// assert_eq!(analyzer.check_missing_values().unwrap().get("name"), Some(1));
/// assert_eq!(analyzer.remove_duplicates().unwrap().row_count(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HygieneAnalyzer<'a> {
    table: &'a Table,
}

impl<'a> HygieneAnalyzer<'a> {
    /// Wrap a table, rejecting it if columns differ in length or share a name.
    pub fn new(table: &'a Table) -> Result<Self> {
        table.validate()?;
        debug!(
            "Analyzer created over {} rows x {} columns",
            table.row_count(),
            table.column_count()
        );
        Ok(Self { table })
    }

    /// The table under analysis.
    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// Count missing entries per column, in column order.
    pub fn check_missing_values(&self) -> Result<MissingValueReport> {
        let mut counts = IndexMap::with_capacity(self.table.column_count());
        for column in &self.table.columns {
            check_conformance(column)?;
            counts.insert(column.name.clone(), column.null_count());
        }

        let report = MissingValueReport::new(counts);
        debug!("Found {} missing entries", report.total());
        Ok(report)
    }

    /// Flag each row that exactly repeats an earlier row.
    pub fn duplicate_mask(&self) -> Result<Vec<bool>> {
        for column in &self.table.columns {
            check_conformance(column)?;
        }

        let mut seen = HashSet::with_capacity(self.table.row_count());
        Ok(self.table.rows().map(|row| !seen.insert(row)).collect())
    }

    /// Number of rows that exactly repeat an earlier row.
    pub fn duplicate_count(&self) -> Result<usize> {
        Ok(self.duplicate_mask()?.into_iter().filter(|&d| d).count())
    }

    /// Build a new table keeping the first occurrence of each distinct row.
    ///
    /// Kept rows stay in their original order. With no duplicates the result
    /// equals the input.
    pub fn remove_duplicates(&self) -> Result<Table> {
        let mask = self.duplicate_mask()?;
        let keep: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, dup)| !**dup)
            .map(|(i, _)| i)
            .collect();

        let removed = mask.len() - keep.len();
        info!(
            "Removed {} duplicate rows ({} remaining)",
            removed,
            keep.len()
        );

        Ok(self.table.select_rows(&keep))
    }

    /// Report declared type, distinct count and missing count for every column.
    pub fn analyze_data_types(&self) -> Result<Vec<ColumnStat>> {
        self.table
            .columns
            .iter()
            .map(|column| -> Result<ColumnStat> {
                check_conformance(column)?;
                Ok(ColumnStat {
                    name: column.name.clone(),
                    column_type: column.column_type,
                    unique_count: column.unique_count(),
                    null_count: column.null_count(),
                })
            })
            .collect()
    }

    /// Run all checks and bundle the results.
    pub fn report(&self) -> Result<HygieneReport> {
        Ok(HygieneReport {
            row_count: self.table.row_count(),
            column_count: self.table.column_count(),
            missing: self.check_missing_values()?,
            duplicate_rows: self.duplicate_count()?,
            columns: self.analyze_data_types()?,
        })
    }
}

/// Fail if a column holds a value that does not fit its declared type.
fn check_conformance(column: &Column) -> Result<()> {
    match column.first_nonconforming() {
        None => Ok(()),
        Some((row, value)) => Err(HygieneError::Analysis(format!(
            "column '{}' is declared {} but row {} holds a {} value",
            column.name,
            column.column_type,
            row,
            value.column_type()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnType, Value};

    fn scenario() -> Table {
        Table::from_rows(
            &["id", "name"],
            vec![
                vec![1i64.into(), "a".into()],
                vec![2i64.into(), "b".into()],
                vec![1i64.into(), "a".into()],
                vec![3i64.into(), Value::Missing],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_check_missing_values() {
        let table = scenario();
        let analyzer = HygieneAnalyzer::new(&table).unwrap();
        let report = analyzer.check_missing_values().unwrap();

        let pairs: Vec<_> = report.iter().collect();
        assert_eq!(pairs, vec![("id", 0), ("name", 1)]);
        assert_eq!(report.total(), 1);
        assert_eq!(report.columns_with_missing().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_remove_duplicates() {
        let table = scenario();
        let analyzer = HygieneAnalyzer::new(&table).unwrap();
        let cleaned = analyzer.remove_duplicates().unwrap();

        assert_eq!(cleaned.row_count(), 3);
        assert_eq!(cleaned.row(0), table.row(0));
        assert_eq!(cleaned.row(1), table.row(1));
        assert_eq!(cleaned.row(2), table.row(3));
        assert_eq!(table.row_count(), 4);
        assert_eq!(analyzer.duplicate_mask().unwrap(), vec![false, false, true, false]);
    }

    #[test]
    fn test_analyze_data_types() {
        let table = scenario();
        let analyzer = HygieneAnalyzer::new(&table).unwrap();
        let stats = analyzer.analyze_data_types().unwrap();

        assert_eq!(
            stats,
            vec![
                ColumnStat {
                    name: "id".to_string(),
                    column_type: ColumnType::Integer,
                    unique_count: 3,
                    null_count: 0,
                },
                ColumnStat {
                    name: "name".to_string(),
                    column_type: ColumnType::Text,
                    unique_count: 3,
                    null_count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_no_duplicates_returns_equal_table() {
        let table = Table::from_rows(
            &["x"],
            vec![vec![1i64.into()], vec![2i64.into()], vec![Value::Missing]],
        )
        .unwrap();
        let analyzer = HygieneAnalyzer::new(&table).unwrap();

        assert_eq!(analyzer.remove_duplicates().unwrap(), table);
        assert_eq!(analyzer.duplicate_count().unwrap(), 0);
    }

    #[test]
    fn test_missing_rows_are_duplicates_of_each_other() {
        let table = Table::from_rows(
            &["a", "b"],
            vec![
                vec![Value::Missing, Value::Missing],
                vec![Value::Missing, Value::Missing],
            ],
        )
        .unwrap();
        let analyzer = HygieneAnalyzer::new(&table).unwrap();
        assert_eq!(analyzer.remove_duplicates().unwrap().row_count(), 1);
    }

    #[test]
    fn test_invalid_table_is_rejected() {
        let table = Table {
            columns: vec![
                Column::new("a", ColumnType::Integer, vec![1i64.into()]),
                Column::new("b", ColumnType::Integer, vec![]),
            ],
        };
        assert!(matches!(
            HygieneAnalyzer::new(&table),
            Err(HygieneError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_nonconforming_column_yields_no_partial_result() {
        let table = Table {
            columns: vec![
                Column::new("ok", ColumnType::Integer, vec![1i64.into(), 2i64.into()]),
                Column::new("bad", ColumnType::Integer, vec![1i64.into(), "x".into()]),
            ],
        };
        let analyzer = HygieneAnalyzer::new(&table).unwrap();

        assert!(matches!(
            analyzer.check_missing_values(),
            Err(HygieneError::Analysis(_))
        ));
        assert!(matches!(
            analyzer.analyze_data_types(),
            Err(HygieneError::Analysis(_))
        ));
        assert!(matches!(
            analyzer.remove_duplicates(),
            Err(HygieneError::Analysis(_))
        ));
        // Still usable afterwards
        assert_eq!(analyzer.table().row_count(), 2);
        assert!(analyzer.check_missing_values().is_err());
    }

    #[test]
    fn test_report() {
        let table = scenario();
        let report = HygieneAnalyzer::new(&table).unwrap().report().unwrap();

        assert_eq!(report.row_count, 4);
        assert_eq!(report.column_count, 2);
        assert_eq!(report.duplicate_rows, 1);
        assert_eq!(report.columns.len(), 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        let analyzer = HygieneAnalyzer::new(&table).unwrap();
        assert!(analyzer.check_missing_values().unwrap().is_empty());
        assert_eq!(analyzer.remove_duplicates().unwrap(), table);
        assert!(analyzer.analyze_data_types().unwrap().is_empty());
    }
}
