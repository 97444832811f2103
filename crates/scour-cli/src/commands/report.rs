//! Report command - clean in memory and print only the quality report.

use std::path::PathBuf;

use colored::Colorize;
use scour::{Pipeline, PipelineConfig, read_records};

pub fn run(
    file: PathBuf,
    json_output: bool,
    fence_multiplier: f64,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (raw, source) = read_records(&file)?;
    let pipeline = Pipeline::with_config(PipelineConfig { fence_multiplier })?;
    let result = pipeline.clean(&raw);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
    } else {
        println!(
            "{} {}",
            "Quality report for".cyan().bold(),
            source.file.white()
        );
        if verbose {
            println!("  format {}, {} bytes, {}", source.format, source.size_bytes, source.hash);
        }
        println!();
        print!("{}", result.report.render_text());
    }

    Ok(())
}
