//! Scour CLI - deterministic cleaning for messy order data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            rows,
            seed,
            messiness,
            start_date,
            end_date,
            output,
        } => commands::generate::run(rows, seed, messiness, start_date, end_date, output, cli.verbose),

        Commands::Clean {
            file,
            output,
            format,
            fence_multiplier,
            report,
        } => commands::clean::run(file, output, format, fence_multiplier, report, cli.verbose),

        Commands::Report {
            file,
            json,
            fence_multiplier,
        } => commands::report::run(file, json, fence_multiplier, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
