//! Loading tables from delimited files and writing them back.

mod loader;
mod source;
mod writer;

pub use loader::{DEFAULT_NA_VALUES, Loader, LoaderConfig};
pub use source::SourceMetadata;
pub use writer::{WriterConfig, write_csv, write_delimited};
