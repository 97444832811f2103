//! Clean command - run the pipeline and write the annotated record set.

use std::path::PathBuf;

use colored::Colorize;
use scour::{OutputFormat, Pipeline, PipelineConfig, read_records, write_records};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    fence_multiplier: f64,
    report_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Cleaning".cyan().bold(),
        file.display().to_string().white()
    );

    let (raw, source) = read_records(&file)?;

    if verbose {
        println!(
            "  {} rows, format {}, {} bytes, {}",
            source.row_count, source.format, source.size_bytes, source.hash
        );
    }

    let pipeline = Pipeline::with_config(PipelineConfig { fence_multiplier })?;
    let result = pipeline.clean(&raw);

    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.cleaned.{}", stem, format));
        p
    });

    write_records(&output_path, &result.records, format)?;

    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );
    println!();
    print!("{}", result.report.render_text());

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&result.report)?;
        std::fs::write(&path, json + "\n")?;
        println!();
        println!(
            "{} {}",
            "Report saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}
