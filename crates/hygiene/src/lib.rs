//! Hygiene: elementary data-quality checks for tabular datasets.
//!
//! A [`Loader`] reads a delimited file into a [`Table`] whose columns carry an
//! explicit [`ColumnType`] and an explicit [`Value::Missing`] marker. A
//! [`HygieneAnalyzer`] borrows the table and answers three questions:
//!
//! - how many entries are missing in each column,
//! - which rows are exact duplicates of an earlier row,
//! - what type each column has and how many distinct values it holds.
//!
//! The source table is never modified; duplicate removal returns a new table.
//!
//! # Example
//!
//! ```no_run
//! use hygiene::{HygieneAnalyzer, Loader};
//!
//! let table = Loader::new().load("data.csv").unwrap();
//! let analyzer = HygieneAnalyzer::new(&table).unwrap();
//!
//! for (column, missing) in analyzer.check_missing_values().unwrap().iter() {
//!     println!("{column}: {missing}");
//! }
//! let cleaned = analyzer.remove_duplicates().unwrap();
//! println!("{} rows after removing duplicates", cleaned.row_count());
//! ```

pub mod analysis;
pub mod error;
pub mod input;
pub mod table;

pub use analysis::{ColumnStat, HygieneAnalyzer, HygieneReport, MissingValueReport};
pub use error::{HygieneError, Result};
pub use input::{Loader, LoaderConfig, SourceMetadata, WriterConfig, write_csv};
pub use table::{Column, ColumnType, Table, Value};
