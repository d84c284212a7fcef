//! Reader and writer configuration

use crate::encoding::Encoding;
use crate::error::{CsvError, Result};

/// Options shared by [`CsvReader`](crate::CsvReader) and [`CsvWriter`](crate::CsvWriter)
///
/// The quote character is always `"`; only the delimiter can change.
///
/// # Examples
///
/// ```
/// use csvrow::{CsvConfig, Encoding};
///
/// let config = CsvConfig::new()
///     .delimiter(';')
///     .encoding(Encoding::Latin1)
///     .has_header(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CsvConfig {
    pub delimiter: char,
    pub encoding: Encoding,
    /// First row is a header (reader only)
    pub has_header: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            encoding: Encoding::Utf8,
            has_header: false,
        }
    }
}

impl CsvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter (builder pattern)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set stream encoding (builder pattern)
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Indicate that the first row contains headers (builder pattern)
    pub fn has_header(mut self, has: bool) -> Self {
        self.has_header = has;
        self
    }

    /// Reject delimiters that collide with the fixed quote or line break characters
    pub fn validate(&self) -> Result<()> {
        match self.delimiter {
            '"' | '\r' | '\n' => Err(CsvError::InvalidDelimiter(self.delimiter)),
            _ => Ok(()),
        }
    }
}
