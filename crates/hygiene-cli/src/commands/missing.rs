//! Missing command - count missing values per column.

use std::path::PathBuf;

use colored::Colorize;
use hygiene::{HygieneAnalyzer, MissingValueReport};

use super::{LoadOptions, load_table};

pub fn run(file: PathBuf, options: &LoadOptions) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_table(&file, options, false)?;
    let analyzer = HygieneAnalyzer::new(&table)?;

    println!();
    print_report(&analyzer.check_missing_values()?);
    Ok(())
}

pub fn print_report(report: &MissingValueReport) {
    println!("{}", "Missing values:".yellow().bold());
    for (column, count) in report.iter() {
        let count_str = if count > 0 {
            count.to_string().red()
        } else {
            count.to_string().green()
        };
        println!("  {:20} {}", column, count_str);
    }

    if report.total() == 0 {
        println!("{}", "No missing values.".green());
    } else {
        println!(
            "{} missing entries in {} columns",
            report.total().to_string().white().bold(),
            report.columns_with_missing().count()
        );
    }
}
