//! In-memory table model: typed columns of explicit values.

mod column;
mod data;
mod types;
mod value;

pub use column::Column;
pub use data::Table;
pub use types::ColumnType;
pub use value::Value;
