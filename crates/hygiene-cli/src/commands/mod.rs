//! CLI command implementations.

pub mod check;
pub mod duplicates;
pub mod missing;
pub mod types;

use std::path::Path;

use colored::Colorize;
use hygiene::{Loader, LoaderConfig, SourceMetadata, Table, WriterConfig};

/// Loader settings shared by every command.
pub struct LoadOptions {
    pub delimiter: Option<u8>,
    pub auto_delimiter: bool,
    pub quote: Option<u8>,
    pub na_values: Vec<String>,
}

impl LoadOptions {
    fn config(&self) -> LoaderConfig {
        let mut config = LoaderConfig::default();
        if self.auto_delimiter {
            config = config.with_auto_delimiter();
        } else if let Some(d) = self.delimiter {
            config = config.with_delimiter(d);
        }
        if let Some(q) = self.quote {
            config = config.with_quote(q);
        }
        if !self.na_values.is_empty() {
            config = config.with_na_values(self.na_values.iter().cloned());
        }
        config
    }

    /// Settings for written output, readable with the same options.
    pub fn writer_config(&self) -> WriterConfig {
        WriterConfig::from(&self.config())
    }
}

/// Load the input file, announcing it on stdout unless `quiet`.
pub fn load_table(
    file: &Path,
    options: &LoadOptions,
    quiet: bool,
) -> Result<Table, Box<dyn std::error::Error>> {
    let table = Loader::with_config(options.config()).load(file)?;
    if !quiet {
        announce(file, &table);
    }
    Ok(table)
}

/// Like [`load_table`], also returning where the table came from.
pub fn load_table_with_source(
    file: &Path,
    options: &LoadOptions,
    quiet: bool,
) -> Result<(Table, SourceMetadata), Box<dyn std::error::Error>> {
    let (table, source) = Loader::with_config(options.config()).load_with_metadata(file)?;
    if !quiet {
        announce(file, &table);
    }
    Ok((table, source))
}

fn announce(file: &Path, table: &Table) {
    println!(
        "{} {} ({} rows, {} columns)",
        "Loaded".cyan().bold(),
        file.display().to_string().white(),
        table.row_count(),
        table.column_count()
    );
}
