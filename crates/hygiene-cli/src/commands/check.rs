//! Check command - run every hygiene check in order.

use std::path::PathBuf;

use colored::Colorize;
use hygiene::{HygieneAnalyzer, HygieneReport, SourceMetadata, write_csv};
use serde_json::json;

use super::{LoadOptions, duplicates, load_table_with_source, missing, types};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    json: bool,
    options: &LoadOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (table, source) = load_table_with_source(&file, options, json)?;
    let analyzer = HygieneAnalyzer::new(&table)?;

    if json {
        let report = analyzer.report()?;
        println!("{}", serde_json::to_string_pretty(&json_output(&source, &report))?);
        if let Some(path) = output {
            write_csv(&analyzer.remove_duplicates()?, &path, &options.writer_config())?;
        }
        return Ok(());
    }

    if verbose {
        println!(
            "  source: {} ({}, {} bytes, {})",
            source.file, source.format, source.size_bytes, source.hash
        );
        println!("  columns: {}", table.column_names().join(", "));
    }

    println!();
    let missing_report = analyzer.check_missing_values()?;
    missing::print_report(&missing_report);

    println!();
    let cleaned = analyzer.remove_duplicates()?;
    duplicates::print_summary(&table, &cleaned);

    println!();
    types::print_stats(&analyzer.analyze_data_types()?);

    if let Some(path) = output {
        println!();
        duplicates::save(&cleaned, &path, options)?;
    }

    println!();
    if missing_report.total() == 0 && cleaned.row_count() == table.row_count() {
        println!("{}", "No issues found - data looks clean!".green());
    } else {
        println!("{}", "Issues found - review the sections above.".yellow());
    }

    Ok(())
}

/// The `--json` document: where the data came from and what was found.
fn json_output(source: &SourceMetadata, report: &HygieneReport) -> serde_json::Value {
    json!({
        "source": source,
        "report": report,
    })
}
