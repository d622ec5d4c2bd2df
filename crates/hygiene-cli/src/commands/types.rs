//! Types command - show type and uniqueness per column.

use std::path::PathBuf;

use colored::Colorize;
use hygiene::{ColumnStat, HygieneAnalyzer};

use super::{LoadOptions, load_table};

pub fn run(file: PathBuf, options: &LoadOptions) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_table(&file, options, false)?;
    let analyzer = HygieneAnalyzer::new(&table)?;

    println!();
    print_stats(&analyzer.analyze_data_types()?);
    Ok(())
}

pub fn print_stats(stats: &[ColumnStat]) {
    println!("{}", "Column types:".yellow().bold());
    let header = format!("  {:20} {:10} {:>8} {:>8}", "column", "type", "unique", "nulls");
    println!("{}", header.dimmed());
    for stat in stats {
        println!(
            "  {:20} {:10} {:>8} {:>8}",
            stat.name,
            stat.column_type.as_str(),
            stat.unique_count,
            stat.null_count
        );
    }
}
