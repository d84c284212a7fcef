//! # csvrow
//!
//! Row-at-a-time CSV reading and writing with RFC 4180 quoting.
//!
//! Reading is driven by a small deterministic state machine: every character
//! is classified (quote, delimiter, `\r`, `\n`, other) and a static transition
//! table decides whether it is appended to the current field, ends the field,
//! ends the row, or rejects the row as malformed. Quoted fields may contain
//! delimiters, line breaks and escaped quotes (`""`).
//!
//! ## Quick Start
//!
//! ```
//! use csvrow::{CsvReader, CsvWriter};
//!
//! let mut writer = CsvWriter::in_memory();
//! writer.write_row(["id", "note"]).unwrap();
//! writer.write_row(["1", "multi\nline, \"quoted\""]).unwrap();
//! let text = writer.into_string().unwrap();
//!
//! let mut reader = CsvReader::from_string(text);
//! assert_eq!(reader.read_row().unwrap(), Some(vec!["id".to_string(), "note".to_string()]));
//! assert_eq!(
//!     reader.read_row().unwrap(),
//!     Some(vec!["1".to_string(), "multi\nline, \"quoted\"".to_string()])
//! );
//! assert_eq!(reader.read_row().unwrap(), None);
//! ```
//!
//! ## Custom delimiter
//!
//! ```
//! use csvrow::{CsvConfig, CsvReader};
//!
//! let mut reader = CsvReader::from_string_with("a;b,c\n", CsvConfig::new().delimiter(';')).unwrap();
//! assert_eq!(reader.read_row().unwrap(), Some(vec!["a".to_string(), "b,c".to_string()]));
//! ```

pub mod config;
pub mod csv;
pub mod csv_reader;
pub mod csv_writer;
pub mod encoding;
pub mod error;
pub mod types;

pub use config::CsvConfig;
pub use csv_reader::{CsvReader, CsvRowIterator};
pub use csv_writer::{serialize_row, CsvWriter};
pub use encoding::Encoding;
pub use error::{CsvError, Result};
pub use types::Row;
