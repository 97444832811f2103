//! Command implementations.

pub mod clean;
pub mod generate;
pub mod report;
