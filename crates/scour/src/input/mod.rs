//! Input parsing: delimited text to raw order records.

mod reader;
mod source;

pub use reader::{Reader, ReaderConfig, read_records};
pub use source::SourceMetadata;
