//! Delimited-text loader with per-column type inference.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::source::SourceMetadata;
use crate::error::{HygieneError, Result};
use crate::table::{Column, ColumnType, Table, Value};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Raw fields read as missing unless configured otherwise.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "NA", "N/A", "NaN", "nan", "NULL", "null", "None", "#N/A", "<NA>",
];

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Raw field values that become [`Value::Missing`]. A quoted field is
    /// never missing.
    pub na_values: Vec<String>,
    /// Maximum data rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: Some(b','),
            quote: b'"',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            max_rows: None,
        }
    }
}

impl LoaderConfig {
    /// Use a fixed delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Detect the delimiter from the first lines of the file.
    pub fn with_auto_delimiter(mut self) -> Self {
        self.delimiter = None;
        self
    }

    /// Use a different quote character.
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Replace the set of raw values read as missing.
    pub fn with_na_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.na_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Stop after this many data rows.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Loads delimited text files into a [`Table`].
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration (comma-separated).
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a file into a table.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Table> {
        let path = path.as_ref();
        let contents = read_file(path)?;
        self.parse_file(path, &contents).map(|(table, _)| table)
    }

    /// Load a file and describe where it came from, including a content hash.
    pub fn load_with_metadata(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();
        let contents = read_file(path)?;
        let (table, delimiter) = self.parse_file(path, &contents)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            delimiter,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse file contents and log the load. Returns the delimiter used.
    fn parse_file(&self, path: &Path, contents: &[u8]) -> Result<(Table, u8)> {
        let delimiter = self.resolve_delimiter(contents)?;
        let table = self.parse_bytes(contents, delimiter)?;

        info!(
            "Loaded {} rows x {} columns from {}",
            table.row_count(),
            table.column_count(),
            path.display()
        );

        Ok((table, delimiter))
    }

    /// Parse in-memory delimited text.
    pub fn parse_str(&self, content: &str) -> Result<Table> {
        let bytes = content.as_bytes();
        let delimiter = self.resolve_delimiter(bytes)?;
        self.parse_bytes(bytes, delimiter)
    }

    fn resolve_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            Some(d) => Ok(d),
            None => detect_delimiter(bytes, self.config.quote),
        }
    }

    /// Parse bytes with a known delimiter.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(false)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(HygieneError::from_csv_read)?
            .clone();

        if headers.is_empty() {
            return Err(HygieneError::EmptyData("No columns found".to_string()));
        }

        // Column-major buffers of raw fields
        let mut fields: Vec<Vec<RawField>> = vec![Vec::new(); headers.len()];
        let mut row_count = 0;

        for result in reader.records() {
            if self.config.max_rows.is_some_and(|max| row_count >= max) {
                break;
            }

            let record = result.map_err(HygieneError::from_csv_read)?;
            let start = record.position().map(|p| p.byte() as usize).unwrap_or(0);
            let quoted = quoted_fields(
                bytes.get(start..).unwrap_or_default(),
                delimiter,
                self.config.quote,
                record.len(),
            );

            for ((column, text), quoted) in fields.iter_mut().zip(record.iter()).zip(quoted) {
                column.push(RawField {
                    text: text.to_string(),
                    quoted,
                });
            }
            row_count += 1;
        }

        if row_count == 0 {
            return Err(HygieneError::EmptyData("No data rows found".to_string()));
        }

        let columns = unique_headers(headers.iter())
            .into_iter()
            .zip(fields)
            .map(|(name, raw)| self.build_column(name, raw))
            .collect();

        Table::new(columns)
    }

    /// Turn raw fields into a typed column.
    fn build_column(&self, name: String, raw: Vec<RawField>) -> Column {
        let na: HashSet<&str> = self.config.na_values.iter().map(String::as_str).collect();
        let is_missing = |field: &RawField| !field.quoted && na.contains(field.text.as_str());

        let present: Vec<&str> = raw
            .iter()
            .filter(|f| !is_missing(*f))
            .map(|f| f.text.as_str())
            .collect();
        let column_type = infer_type(&present);
        debug!("Column '{}' inferred as {}", name, column_type);

        let values = raw
            .into_iter()
            .map(|field| {
                if is_missing(&field) {
                    Value::Missing
                } else {
                    convert(field.text, column_type)
                }
            })
            .collect();

        Column::new(name, column_type, values)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// A raw field and whether it was quoted in the source.
#[derive(Debug, Clone)]
struct RawField {
    text: String,
    quoted: bool,
}

/// Read a whole file. The handle is closed on every return path.
fn read_file(path: &Path) -> Result<Vec<u8>> {
    let not_found = |source| HygieneError::FileNotFound {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(not_found)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).map_err(not_found)?;
    Ok(contents)
}

/// Decide a column type from its non-missing raw values.
fn infer_type(values: &[&str]) -> ColumnType {
    if values.is_empty() {
        ColumnType::Missing
    } else if values.iter().all(|v| v.trim().parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if values.iter().all(|v| v.trim().parse::<f64>().is_ok()) {
        ColumnType::Float
    } else if values.iter().all(|v| parse_bool(v).is_some()) {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    }
}

/// Convert a raw non-missing field into a value of the given type.
fn convert(field: String, column_type: ColumnType) -> Value {
    let parsed = match column_type {
        ColumnType::Integer => field.trim().parse().ok().map(Value::Integer),
        ColumnType::Float => field.trim().parse().ok().map(Value::Float),
        ColumnType::Boolean => parse_bool(&field).map(Value::Boolean),
        ColumnType::Text | ColumnType::Missing => None,
    };
    parsed.unwrap_or(Value::Text(field))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Flag which of the first `count` fields of a raw record open with the quote
/// character. `record` starts at the record's byte offset.
fn quoted_fields(record: &[u8], delimiter: u8, quote: u8, count: usize) -> Vec<bool> {
    // Blank lines before a record are skipped by the reader
    let mut pos = record
        .iter()
        .take_while(|&&b| b == b'\r' || b == b'\n')
        .count();
    let mut flags = Vec::with_capacity(count);

    while flags.len() < count {
        let quoted = record.get(pos) == Some(&quote);
        if quoted {
            pos += 1;
            while pos < record.len() {
                if record[pos] == quote {
                    // Doubled quote is an escaped quote
                    if record.get(pos + 1) == Some(&quote) {
                        pos += 2;
                        continue;
                    }
                    break;
                }
                pos += 1;
            }
        }
        while pos < record.len() && record[pos] != delimiter {
            pos += 1;
        }
        pos += 1;
        flags.push(quoted);
    }

    flags
}

/// Make header names unique: blank names become `Unnamed: <i>`, repeats get
/// `.1`, `.2`, ... suffixes.
fn unique_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for (idx, header) in headers.enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 0;
        while seen.contains(&name) {
            suffix += 1;
            name = format!("{}.{}", base, suffix);
        }

        seen.insert(name.clone());
        names.push(name);
    }

    names
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(HygieneError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim, quote))
            .collect();

        let first = counts[0];
        if first == 0 {
            continue;
        }

        // A delimiter seen the same number of times on every line wins over a
        // more frequent but irregular one.
        let score = if counts.iter().all(|&c| c == first) {
            first * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, ignoring quoted sections.
fn count_delimiter_in_line(line: &str, delimiter: u8, quote: u8) -> usize {
    let mut count = 0;
    let mut in_quotes = false;

    for byte in line.bytes() {
        if byte == quote {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }

    count
}
