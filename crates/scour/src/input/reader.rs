//! Delimited-text reader with delimiter auto-detection.
//!
//! Columns are matched by header name. Unknown extra columns are ignored,
//! except the `issues` column a previous cleaning run appended, whose flags
//! are carried back onto the records. A missing required column is fatal
//! before any cleaning runs.

use std::fs::File;
use std::io::{BufRead, BufReader, Read as _};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, ScourError};
use crate::normalize::Field;
use crate::record::{Issue, RawRecord};

use super::source::SourceMetadata;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
        }
    }
}

/// Reads order records from delimited text files.
pub struct Reader {
    config: ReaderConfig,
}

impl Reader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self {
            config: ReaderConfig::default(),
        }
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file and return the raw records plus source provenance.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<(Vec<RawRecord>, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| ScourError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| ScourError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let records = self.read_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            records.len(),
        );

        Ok((records, source))
    }

    /// Parse bytes directly.
    pub fn read_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Vec<RawRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.trim().to_string()).collect();

        // Resolve each required column to its position, by name.
        let mut positions = [0usize; 7];
        for (slot, field) in Field::ALL.iter().enumerate() {
            let pos = headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(field.column()))
                .ok_or_else(|| ScourError::MissingColumn(field.column().to_string()))?;
            positions[slot] = pos;
        }

        // The `issues` column from a previous run, if present, is carried
        // back in so re-cleaning keeps the original flags.
        let issues_position = headers.iter().position(|h| h.eq_ignore_ascii_case("issues"));

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let cell = |slot: usize| row.get(positions[slot]).unwrap_or("").to_string();
            let carried_issues = issues_position
                .and_then(|pos| row.get(pos))
                .map(|cell| cell.split(';').filter_map(Issue::from_token).collect())
                .unwrap_or_default();
            records.push(RawRecord {
                customer_name: cell(0),
                customer_email: cell(1),
                customer_phone: cell(2),
                order_date: cell(3),
                product_id: cell(4),
                price: cell(5),
                quantity: cell(6),
                carried_issues,
            });
        }

        if records.is_empty() {
            return Err(ScourError::EmptyData("No data rows found".to_string()));
        }

        Ok(records)
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read records with the default configuration.
pub fn read_records(path: impl AsRef<Path>) -> Result<(Vec<RawRecord>, SourceMetadata)> {
    Reader::new().read_file(path)
}

/// Detect the delimiter by analyzing the first few lines: the candidate with
/// the highest consistent per-line count wins, with a slight bonus for tab.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ScourError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0usize;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_outside_quotes(line, delim))
            .collect();

        let first = counts[0];
        if first == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first);
        let score = if consistent {
            first * 1000 + usize::from(delim == b'\t') * 100
        } else {
            first
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting double quotes.
fn count_outside_quotes(line: &str, delimiter: u8) -> usize {
    let delim = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
