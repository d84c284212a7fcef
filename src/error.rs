//! Error types for CSV reading and writing

use crate::encoding::Encoding;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors produced while tokenizing or serializing CSV
#[derive(Debug, Error)]
pub enum CsvError {
    /// Content followed a closing quote without a delimiter or line break.
    ///
    /// `offset` is the 1-based character position within the row.
    #[error("Illegal CSV format at char {offset} (row {row})")]
    Malformed { row: u64, offset: u64 },

    /// Failure of the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source could not be opened
    #[error("Read error: {0}")]
    ReadError(String),

    /// Sink could not be created
    #[error("Write error: {0}")]
    WriteError(String),

    /// Input bytes are not valid in the declared encoding
    #[error("Invalid {encoding} data at byte {offset}")]
    Decode { encoding: Encoding, offset: u64 },

    /// Character cannot be represented in the target encoding
    #[error("Character {ch:?} cannot be encoded as {encoding}")]
    Unencodable { encoding: Encoding, ch: char },

    #[error("Invalid delimiter {0:?}: must not be a quote or line break")]
    InvalidDelimiter(char),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Reader or writer was used after `close()`
    #[error("CSV stream is closed")]
    Closed,
}

impl CsvError {
    /// Whether this error rejected a single row and the stream may continue
    pub fn is_malformed(&self) -> bool {
        matches!(self, CsvError::Malformed { .. })
    }
}
