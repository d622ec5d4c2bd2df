//! Writing tables back out as delimited text.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::QuoteStyle;
use tracing::info;

use super::loader::LoaderConfig;
use crate::error::{HygieneError, Result};
use crate::table::{Table, Value};

/// Writer configuration.
///
/// Output is meant to be read back with the loader settings it was built
/// from, so missing cells are written as an NA token and present values that
/// look like one are quoted.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Text written for [`Value::Missing`].
    pub na_rep: String,
    /// Raw values the output will be read back as missing.
    pub na_values: Vec<String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::from(&LoaderConfig::default())
    }
}

impl From<&LoaderConfig> for WriterConfig {
    /// Match a loader configuration. A detected delimiter falls back to a
    /// comma, and missing cells use the first non-empty NA value.
    fn from(config: &LoaderConfig) -> Self {
        let na_rep = config
            .na_values
            .iter()
            .find(|v| !v.is_empty())
            .or_else(|| config.na_values.first())
            .cloned()
            .unwrap_or_default();

        Self {
            delimiter: config.delimiter.unwrap_or(b','),
            quote: config.quote,
            na_rep,
            na_values: config.na_values.clone(),
        }
    }
}

impl WriterConfig {
    /// Use a fixed delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write missing cells as this text.
    pub fn with_na_rep(mut self, na_rep: impl Into<String>) -> Self {
        self.na_rep = na_rep.into();
        self
    }

    /// Check that missing cells survive a reload.
    fn check_na_rep(&self, table: &Table) -> Result<()> {
        if !table.columns.iter().any(|c| c.null_count() > 0) {
            return Ok(());
        }

        if !self.na_values.contains(&self.na_rep) {
            return Err(HygieneError::InvalidInput(format!(
                "missing values written as '{}' would not read back as missing",
                self.na_rep
            )));
        }
        // A lone empty field is a blank line, which readers skip
        if self.na_rep.is_empty() && table.column_count() == 1 {
            return Err(HygieneError::InvalidInput(
                "missing values in a single-column table need a non-empty NA token".to_string(),
            ));
        }

        Ok(())
    }

    /// Render one cell as raw field text.
    fn field(&self, value: &Value, lone: bool) -> String {
        if value.is_missing() {
            return self.na_rep.clone();
        }

        let text = value.to_string();
        let needs_quotes = self.na_values.contains(&text)
            || (lone && text.is_empty())
            || text
                .bytes()
                .any(|b| b == self.delimiter || b == self.quote || b == b'\n' || b == b'\r');

        if needs_quotes {
            self.quoted(&text)
        } else {
            text
        }
    }

    fn quoted(&self, text: &str) -> String {
        let quote = char::from(self.quote);
        let escaped = text.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }
}

/// Write a table to a file, header first.
pub fn write_csv(table: &Table, path: impl AsRef<Path>, config: &WriterConfig) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| HygieneError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    write_delimited(table, BufWriter::new(file), config)?;
    info!("Wrote {} rows to {}", table.row_count(), path.display());
    Ok(())
}

/// Write a table to any writer.
pub fn write_delimited<W: Write>(table: &Table, out: W, config: &WriterConfig) -> Result<()> {
    table.validate()?;
    config.check_na_rep(table)?;

    // Fields are quoted by `WriterConfig::field`
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote(config.quote)
        .quote_style(QuoteStyle::Never)
        .from_writer(out);

    let lone = table.column_count() == 1;
    writer.write_record(
        table
            .column_names()
            .into_iter()
            .map(|name| config.field(&Value::text(name), lone)),
    )?;
    for row in table.rows() {
        writer.write_record(row.into_iter().map(|value| config.field(value, lone)))?;
    }
    writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Loader;
    use crate::table::{Column, ColumnType};

    fn write_to_string(table: &Table, config: &WriterConfig) -> String {
        let mut out = Vec::new();
        write_delimited(table, &mut out, config).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_delimited() {
        let table = Loader::new()
            .parse_str("id,score,name\n1,2.0,a\n2,,\"b,c\"\n")
            .unwrap();

        assert_eq!(
            write_to_string(&table, &WriterConfig::default()),
            "id,score,name\n1,2.0,a\n2,NA,\"b,c\"\n"
        );
    }

    #[test]
    fn test_present_na_tokens_are_quoted() {
        let table = Table::from_rows(
            &["name", "x"],
            vec![
                vec!["NA".into(), Value::Float(f64::NAN)],
                vec!["".into(), Value::Missing],
            ],
        )
        .unwrap();

        let written = write_to_string(&table, &WriterConfig::default());
        assert_eq!(written, "name,x\n\"NA\",\"NaN\"\n\"\",NA\n");

        let reloaded = Loader::new().parse_str(&written).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_custom_na_set_round_trip() {
        let config = LoaderConfig::default().with_na_values(["?"]);
        let loader = Loader::with_config(config.clone());
        let table = loader.parse_str("id,name\n1,\"?\"\n2,?\n3,\n").unwrap();
        assert_eq!(table.columns[1].null_count(), 1);

        let written = write_to_string(&table, &WriterConfig::from(&config));
        assert_eq!(written, "id,name\n1,\"?\"\n2,?\n3,\n");
        assert_eq!(loader.parse_str(&written).unwrap(), table);
    }

    #[test]
    fn test_single_column_empty_text() {
        let table = Table::from_rows(&["name"], vec![vec!["".into()], vec!["a".into()]]).unwrap();
        let config = WriterConfig::default().with_na_rep("");

        let written = write_to_string(&table, &config);
        assert_eq!(written, "name\n\"\"\na\n");
        assert_eq!(Loader::new().parse_str(&written).unwrap(), table);
    }

    #[test]
    fn test_unreadable_na_rep_is_rejected() {
        let table = Table::from_rows(&["a", "b"], vec![vec![1i64.into(), Value::Missing]]).unwrap();

        let config = WriterConfig::default().with_na_rep("-");
        assert!(matches!(
            write_delimited(&table, Vec::new(), &config),
            Err(HygieneError::InvalidInput(_))
        ));

        let lone = Table::from_rows(&["a"], vec![vec![Value::Missing]]).unwrap();
        let config = WriterConfig::default().with_na_rep("");
        assert!(matches!(
            write_delimited(&lone, Vec::new(), &config),
            Err(HygieneError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ragged_table_is_rejected() {
        let table = Table {
            columns: vec![
                Column::new("a", ColumnType::Integer, vec![1i64.into(), 2i64.into()]),
                Column::new("b", ColumnType::Integer, vec![1i64.into()]),
            ],
        };

        assert!(matches!(
            write_delimited(&table, Vec::new(), &WriterConfig::default()),
            Err(HygieneError::InvalidInput(_))
        ));
    }
}
