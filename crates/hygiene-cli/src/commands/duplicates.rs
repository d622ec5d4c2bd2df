//! Duplicates command - find and remove duplicate rows.

use std::path::{Path, PathBuf};

use colored::Colorize;
use hygiene::{HygieneAnalyzer, Table, write_csv};

use super::{LoadOptions, load_table};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    options: &LoadOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_table(&file, options, false)?;
    let analyzer = HygieneAnalyzer::new(&table)?;
    let cleaned = analyzer.remove_duplicates()?;

    println!();
    print_summary(&table, &cleaned);

    if let Some(path) = output {
        save(&cleaned, &path, options)?;
    }
    Ok(())
}

pub fn print_summary(original: &Table, cleaned: &Table) {
    println!("{}", "Duplicate rows:".yellow().bold());

    let removed = original.row_count() - cleaned.row_count();
    if removed == 0 {
        println!("{}", "No duplicate rows.".green());
    } else {
        println!(
            "Removed {} duplicate rows; {} rows remain",
            removed.to_string().red(),
            cleaned.row_count().to_string().white().bold()
        );
    }
}

pub fn save(
    cleaned: &Table,
    path: &Path,
    options: &LoadOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    write_csv(cleaned, path, &options.writer_config())?;
    println!(
        "{} {}",
        "Saved to".green().bold(),
        path.display().to_string().white()
    );
    Ok(())
}
