//! Results returned by the hygiene checks.

use indexmap::IndexMap;
use serde::Serialize;

use crate::table::ColumnType;

/// Missing-entry counts per column, in table column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MissingValueReport {
    counts: IndexMap<String, usize>,
}

impl MissingValueReport {
    pub(crate) fn new(counts: IndexMap<String, usize>) -> Self {
        Self { counts }
    }

    /// Missing count for one column.
    pub fn get(&self, column: &str) -> Option<usize> {
        self.counts.get(column).copied()
    }

    /// Iterate `(column, count)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of columns covered.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Missing entries across all columns.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Columns with at least one missing entry.
    pub fn columns_with_missing(&self) -> impl Iterator<Item = &str> {
        self.counts
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(k, _)| k.as_str())
    }

    /// Borrow the underlying ordered map.
    pub fn as_map(&self) -> &IndexMap<String, usize> {
        &self.counts
    }
}

/// Type and uniqueness summary for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnStat {
    /// Column name.
    pub name: String,
    /// Declared type.
    pub column_type: ColumnType,
    /// Distinct values, with all missing entries counted as one class.
    pub unique_count: usize,
    /// Missing entries.
    pub null_count: usize,
}

/// All three hygiene signals for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HygieneReport {
    pub row_count: usize,
    pub column_count: usize,
    /// Missing entries per column.
    pub missing: MissingValueReport,
    /// Rows that repeat an earlier row.
    pub duplicate_rows: usize,
    /// Per-column type statistics.
    pub columns: Vec<ColumnStat>,
}

impl HygieneReport {
    /// Returns true if no missing entries and no duplicate rows were found.
    pub fn is_clean(&self) -> bool {
        self.missing.total() == 0 && self.duplicate_rows == 0
    }
}
