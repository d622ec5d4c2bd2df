//! Hygiene CLI - data quality checks for delimited files.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::LoadOptions;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = LoadOptions {
        delimiter: cli.delimiter,
        auto_delimiter: cli.auto_delimiter,
        quote: cli.quote,
        na_values: cli.na_values,
    };

    let result = match cli.command {
        Commands::Check { file, output, json } => {
            commands::check::run(file, output, json, &options, cli.verbose)
        }
        Commands::Missing { file } => commands::missing::run(file, &options),
        Commands::Duplicates { file, output } => commands::duplicates::run(file, output, &options),
        Commands::Types { file } => commands::types::run(file, &options),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
