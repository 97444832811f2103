//! Generate command - produce a synthetic messy order dataset.

use std::path::PathBuf;

use chrono::NaiveDate;
use colored::Colorize;
use scour::{Generator, GeneratorConfig, write_raw_records};

pub fn run(
    rows: usize,
    seed: u64,
    messiness: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    output: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = GeneratorConfig {
        rows,
        seed,
        messiness,
        start_date,
        end_date,
    };

    let mut generator = Generator::with_config(config)?;
    let records = generator.generate();

    if verbose {
        println!(
            "seed={} messiness={} dates {}..{}",
            seed, messiness, start_date, end_date
        );
    }

    write_raw_records(&output, &records)?;

    println!(
        "{} {} records to {}",
        "Wrote".green().bold(),
        records.len().to_string().white().bold(),
        output.display().to_string().white()
    );
    println!(
        "Run {} to clean it",
        format!("scour clean {}", output.display()).cyan().bold()
    );

    Ok(())
}
