//! Scour: deterministic cleaning pipeline for messy e-commerce order data.
//!
//! Scour ingests one bounded batch of order records, repairs field
//! formatting, resolves missing identity fields from evidence already on the
//! record, flags statistical outliers and duplicate groups, and emits an
//! annotated record set plus a quality report.
//!
//! # Core Principles
//!
//! - **Non-destructive**: no record is ever dropped; problems become flags
//! - **Deterministic**: the same input and configuration always produce the
//!   same output, and cleaning its own output is a no-op
//! - **Boundary I/O**: reading and writing happen around the pipeline, never
//!   inside it
//!
//! # Example
//!
//! ```no_run
//! use scour::{Pipeline, read_records};
//!
//! let (raw, source) = read_records("orders.csv").unwrap();
//! let result = Pipeline::new().clean(&raw);
//!
//! println!("{} records from {}", result.records.len(), source.file);
//! println!("{}", result.report.render_text());
//! ```

pub mod duplicate;
pub mod error;
pub mod generate;
pub mod input;
pub mod normalize;
pub mod output;
pub mod record;
pub mod report;
pub mod resolve;
pub mod stats;

mod pipeline;

pub use crate::pipeline::{CleanResult, Pipeline, PipelineConfig};
pub use error::{Result, ScourError};
pub use generate::{Generator, GeneratorConfig};
pub use input::{SourceMetadata, read_records};
pub use output::{OutputFormat, write_raw_records, write_records};
pub use record::{CleanRecord, DuplicateTag, Issue, RawRecord};
pub use report::QualityReport;
pub use stats::FieldOutlierReport;
