//! Utility functions and helpers.

pub mod export;

pub use export::{entries_csv, export_filename, summary_csv, CsvExport};
