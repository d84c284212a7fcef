//! Type definitions for CSV data

/// One CSV record: fields in input order, empty fields preserved
pub type Row = Vec<String>;
