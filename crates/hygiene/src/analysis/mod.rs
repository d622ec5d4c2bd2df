//! Hygiene checks over an in-memory table.

mod analyzer;
mod report;

pub use analyzer::HygieneAnalyzer;
pub use report::{ColumnStat, HygieneReport, MissingValueReport};
