//! Output serialization for cleaned record sets.
//!
//! CSV and TSV append two flag columns to the canonical fields: `issues`
//! (semicolon-joined tokens) marks flagged cells for formats that cannot
//! carry styling, and `duplicate_group` names the group key and position.
//! The reader understands both, so cleaned output can be fed back through
//! the pipeline unchanged.

use std::fs::File;
use std::path::Path;

use crate::error::{Result, ScourError};
use crate::normalize::Field;
use crate::record::{CleanRecord, RawRecord};

/// Output format selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Write cleaned records to a file in the selected format.
pub fn write_records(
    path: impl AsRef<Path>,
    records: &[CleanRecord],
    format: OutputFormat,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ScourError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    match format {
        OutputFormat::Csv => write_delimited(file, records, b','),
        OutputFormat::Tsv => write_delimited(file, records, b'\t'),
        OutputFormat::Json => write_json(file, records),
    }
}

/// Render records as delimited text (used by `write_records` and tests).
pub fn write_delimited(
    out: impl std::io::Write,
    records: &[CleanRecord],
    delimiter: u8,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(delimiter).from_writer(out);

    let mut header: Vec<&str> = Field::ALL.iter().map(|f| f.column()).collect();
    header.push("total_value");
    header.push("issues");
    header.push("duplicate_group");
    writer.write_record(&header)?;

    for record in records {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        writer.write_record(&[
            opt(&record.customer_name),
            opt(&record.customer_email),
            opt(&record.customer_phone),
            opt(&record.order_date),
            opt(&record.product_id),
            record.price.map(|p| format!("{p:.2}")).unwrap_or_default(),
            record.quantity.map(|q| q.to_string()).unwrap_or_default(),
            record.total_value.map(|t| format!("{t:.2}")).unwrap_or_default(),
            record.issues_token(),
            record
                .duplicate
                .as_ref()
                .map(|d| d.render())
                .unwrap_or_default(),
        ])?;
    }

    writer.flush().map_err(|e| ScourError::Io {
        path: std::path::PathBuf::from("<writer>"),
        source: e,
    })?;
    Ok(())
}

/// Write raw (uncleaned) records as CSV, fields exactly as held.
///
/// Used by the generator to emit datasets the pipeline can ingest.
pub fn write_raw_records(path: impl AsRef<Path>, records: &[RawRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ScourError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = csv::Writer::from_writer(file);
    let header: Vec<&str> = Field::ALL.iter().map(|f| f.column()).collect();
    writer.write_record(&header)?;

    for record in records {
        writer.write_record(&[
            &record.customer_name,
            &record.customer_email,
            &record.customer_phone,
            &record.order_date,
            &record.product_id,
            &record.price,
            &record.quantity,
        ])?;
    }

    writer.flush().map_err(|e| ScourError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

fn write_json(mut out: impl std::io::Write, records: &[CleanRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, records)?;
    out.write_all(b"\n").map_err(|e| ScourError::Io {
        path: std::path::PathBuf::from("<writer>"),
        source: e,
    })?;
    Ok(())
}
