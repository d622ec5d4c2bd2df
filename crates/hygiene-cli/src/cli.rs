//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Path used when no file is given.
const DEFAULT_FILE: &str = "data.csv";

/// Hygiene: missing values, duplicate rows and column types for tabular data
#[derive(Parser)]
#[command(name = "hygiene")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Field delimiter (a single ASCII character, or "tab")
    #[arg(short, long, global = true, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Detect the delimiter from the file contents
    #[arg(long, global = true, conflicts_with = "delimiter")]
    pub auto_delimiter: bool,

    /// Quote character (a single ASCII character)
    #[arg(short, long, global = true, value_parser = parse_quote)]
    pub quote: Option<u8>,

    /// Value to read as missing (repeatable; replaces the default set)
    #[arg(long = "na", global = true, value_name = "VALUE")]
    pub na_values: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run all checks: missing values, duplicate rows, column types
    Check {
        /// Path to the data file
        #[arg(value_name = "FILE", default_value = DEFAULT_FILE)]
        file: PathBuf,

        /// Write the table without duplicate rows to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count missing values per column
    Missing {
        /// Path to the data file
        #[arg(value_name = "FILE", default_value = DEFAULT_FILE)]
        file: PathBuf,
    },

    /// Find and remove duplicate rows
    Duplicates {
        /// Path to the data file
        #[arg(value_name = "FILE", default_value = DEFAULT_FILE)]
        file: PathBuf,

        /// Write the table without duplicate rows to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show type, distinct count and missing count per column
    Types {
        /// Path to the data file
        #[arg(value_name = "FILE", default_value = DEFAULT_FILE)]
        file: PathBuf,
    },
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "Invalid delimiter: {:?}. Use a single ASCII character or \"tab\".",
                    s
                )),
            }
        }
    }
}

fn parse_quote(s: &str) -> Result<u8, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(format!("Invalid quote: {:?}. Use a single ASCII character.", s)),
    }
}
