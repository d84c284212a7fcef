//! CSV reading, one row at a time

use crate::config::CsvConfig;
use crate::csv::{CharSource, ReadSource, RowTokenizer, StringSource};
use crate::error::{CsvError, Result};
use crate::types::Row;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// CSV reader over a file, string or byte stream
///
/// Rows are tokenized on demand; memory use is bounded by the longest row.
///
/// # Examples
///
/// ```
/// use csvrow::CsvReader;
///
/// let mut reader = CsvReader::from_string("name,quote\nAda,\"said \"\"hi\"\"\"\n");
///
/// while let Some(row) = reader.read_row().unwrap() {
///     println!("{:?}", row);
/// }
/// assert_eq!(reader.row_count(), 2);
/// ```
///
/// # With Headers
///
/// ```
/// use csvrow::{CsvConfig, CsvReader};
///
/// let mut reader = CsvReader::from_string_with(
///     "id;name\n1;Ada\n",
///     CsvConfig::new().delimiter(';').has_header(true),
/// )
/// .unwrap();
///
/// let rows: Vec<_> = reader.rows().collect::<Result<_, _>>().unwrap();
/// assert_eq!(rows, vec![vec!["1".to_string(), "Ada".to_string()]]);
/// assert_eq!(reader.headers(), Some(&["id".to_string(), "name".to_string()][..]));
/// ```
pub struct CsvReader {
    // None once closed
    tokenizer: Option<RowTokenizer<Box<dyn CharSource>>>,
    config: CsvConfig,
    row_count: u64,
    headers: Vec<String>,
    // set once the first row (or a malformed first row) has been read
    header_consumed: bool,
}

impl CsvReader {
    /// Open a CSV file with the default configuration
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, CsvConfig::default())
    }

    /// Open a CSV file, decoding it with `config.encoding`
    pub fn open_with<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Self> {
        config.validate()?;
        let path_ref = path.as_ref();
        let file = File::open(path_ref).map_err(|e| {
            CsvError::ReadError(format!(
                "Failed to open CSV file {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path_ref.display(), delimiter = ?config.delimiter, encoding = %config.encoding, "opened CSV file");
        let source = ReadSource::new(BufReader::new(file), config.encoding);
        Ok(Self::with_source(Box::new(source), config))
    }

    /// Read CSV held in memory with the default configuration
    pub fn from_string(text: impl Into<String>) -> Self {
        Self::with_source(
            Box::new(StringSource::new(text)),
            CsvConfig::default(),
        )
    }

    /// Read CSV held in memory; `config.encoding` is not used
    pub fn from_string_with(text: impl Into<String>, config: CsvConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_source(Box::new(StringSource::new(text)), config))
    }

    /// Read CSV from any byte stream with the default configuration
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        let config = CsvConfig::default();
        Self::with_source(
            Box::new(ReadSource::new(BufReader::new(reader), config.encoding)),
            config,
        )
    }

    /// Read CSV from any byte stream, decoding it with `config.encoding`
    pub fn from_reader_with<R: Read + 'static>(reader: R, config: CsvConfig) -> Result<Self> {
        config.validate()?;
        let source = ReadSource::new(BufReader::new(reader), config.encoding);
        Ok(Self::with_source(Box::new(source), config))
    }

    /// Read CSV from a caller-supplied character source
    pub fn from_source<S: CharSource + 'static>(source: S, config: CsvConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_source(Box::new(source), config))
    }

    fn with_source(source: Box<dyn CharSource>, config: CsvConfig) -> Self {
        CsvReader {
            tokenizer: Some(RowTokenizer::new(source, config.delimiter)),
            config,
            row_count: 0,
            headers: Vec::new(),
            header_consumed: false,
        }
    }

    /// Indicate that the first row contains headers (builder pattern)
    ///
    /// The first row read is stored and accessible via `headers()`;
    /// the `rows()` iterator skips it.
    pub fn has_header(mut self, has: bool) -> Self {
        self.config.has_header = has;
        self
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Get header row if available
    pub fn headers(&self) -> Option<&[String]> {
        if self.headers.is_empty() {
            None
        } else {
            Some(&self.headers)
        }
    }

    /// Read a single row
    ///
    /// Returns `Ok(None)` when EOF is reached. After a
    /// [`CsvError::Malformed`] error the following call continues with the
    /// rest of the input.
    ///
    /// With headers enabled, the first row read is stored as the header. If
    /// that row is malformed the error is returned, no header is stored, and
    /// every later row is data.
    pub fn read_row(&mut self) -> Result<Option<Row>> {
        let tokenizer = self.tokenizer.as_mut().ok_or(CsvError::Closed)?;
        let fields = match tokenizer.next_row() {
            Ok(Some(fields)) => fields,
            Ok(None) => return Ok(None),
            Err(e) => {
                if e.is_malformed() {
                    self.header_consumed = true;
                }
                return Err(e);
            }
        };

        if self.header_pending() {
            self.headers = fields.clone();
        }
        self.header_consumed = true;

        self.row_count += 1;
        Ok(Some(fields))
    }

    /// Whether the next row read will be taken as the header
    fn header_pending(&self) -> bool {
        self.config.has_header && !self.header_consumed
    }

    /// Get iterator over rows, skipping the header row if configured
    pub fn rows(&mut self) -> CsvRowIterator<'_> {
        CsvRowIterator { reader: self }
    }

    /// Get the number of rows read so far, header included
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn is_closed(&self) -> bool {
        self.tokenizer.is_none()
    }

    /// Release the underlying source. Safe to call more than once.
    pub fn close(&mut self) {
        if self.tokenizer.take().is_some() {
            tracing::debug!(rows = self.row_count, "closed CSV reader");
        }
    }
}

impl fmt::Debug for CsvReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvReader")
            .field("config", &self.config)
            .field("row_count", &self.row_count)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

/// Iterator over CSV rows
pub struct CsvRowIterator<'a> {
    reader: &'a mut CsvReader,
}

impl Iterator for CsvRowIterator<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let is_header = self.reader.header_pending();
            match self.reader.read_row() {
                Ok(Some(_)) if is_header => continue,
                result => return result.transpose(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_writer::CsvWriter;
    use crate::encoding::Encoding;
    use std::io::Cursor;

    #[test]
    fn test_read_plain_csv() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("plain.csv");
        {
            let mut writer = CsvWriter::new(&path)?;
            writer.write_row(["Name", "Age", "City"])?;
            writer.write_row(["Alice", "30", "NYC"])?;
            writer.write_row(["Bob", "25", "San Francisco, CA"])?;
            writer.save()?;
        }

        let mut reader = CsvReader::open(&path)?;
        let mut rows = vec![];
        for row_result in reader.rows() {
            rows.push(row_result?);
        }

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Name", "Age", "City"]);
        assert_eq!(rows[2], vec!["Bob", "25", "San Francisco, CA"]);
        Ok(())
    }

    #[test]
    fn test_read_with_headers() -> Result<()> {
        let mut reader = CsvReader::from_string("ID,Name\n1,Alice\n2,Bob\n").has_header(true);
        assert_eq!(reader.headers(), None);

        let rows = reader.rows().collect::<Result<Vec<_>>>()?;

        assert_eq!(
            reader.headers(),
            Some(&["ID".to_string(), "Name".to_string()][..])
        );
        assert_eq!(rows, vec![vec!["1", "Alice"], vec!["2", "Bob"]]);
        assert_eq!(reader.row_count(), 3);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = CsvReader::open("/nonexistent/dir/missing.csv").unwrap_err();
        assert!(matches!(err, CsvError::ReadError(_)));
    }

    #[test]
    fn test_invalid_delimiter() {
        let err = CsvReader::from_string_with("a", CsvConfig::new().delimiter('"')).unwrap_err();
        assert!(matches!(err, CsvError::InvalidDelimiter('"')));
    }

    #[test]
    fn test_latin1_reader() -> Result<()> {
        let config = CsvConfig::new().encoding(Encoding::Latin1);
        let mut reader = CsvReader::from_reader_with(Cursor::new(b"caf\xE9,\"na\xEFve\"\n".to_vec()), config)?;
        assert_eq!(reader.read_row()?, Some(vec!["café".to_string(), "naïve".to_string()]));
        assert_eq!(reader.read_row()?, None);
        Ok(())
    }

    #[test]
    fn test_iterator_continues_after_malformed_row() {
        let mut reader = CsvReader::from_string("a\n\"b\"x\nc\n");
        let results: Vec<_> = reader.rows().collect();
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap(), &vec!["a".to_string()]);
        assert!(matches!(results[1], Err(CsvError::Malformed { row: 2, offset: 4 })));
        // the rest of the rejected line is read as its own row
        assert_eq!(results[2].as_ref().unwrap(), &vec!["".to_string()]);
        assert_eq!(results[3].as_ref().unwrap(), &vec!["c".to_string()]);
    }

    #[test]
    fn test_malformed_header_row_does_not_hide_data() {
        let mut reader =
            CsvReader::from_string("\"id\"x,name\n1,Ada\n2,Bob\n").has_header(true);
        let results: Vec<_> = reader.rows().collect();

        assert_eq!(results.len(), 4);
        assert!(matches!(results[0], Err(CsvError::Malformed { row: 1, offset: 5 })));
        // the rest of the rejected line is returned, not taken as the header
        assert_eq!(results[1].as_ref().unwrap(), &vec!["".to_string(), "name".to_string()]);
        assert_eq!(results[2].as_ref().unwrap(), &vec!["1".to_string(), "Ada".to_string()]);
        assert_eq!(results[3].as_ref().unwrap(), &vec!["2".to_string(), "Bob".to_string()]);
        assert_eq!(reader.headers(), None);
    }

    #[test]
    fn test_header_read_manually_is_not_skipped_twice() -> Result<()> {
        let mut reader = CsvReader::from_string("h\na\nb\n").has_header(true);
        assert_eq!(reader.read_row()?, Some(vec!["h".to_string()]));
        let rows = reader.rows().collect::<Result<Vec<_>>>()?;
        assert_eq!(rows, vec![vec!["a"], vec!["b"]]);
        assert_eq!(reader.headers(), Some(&["h".to_string()][..]));
        Ok(())
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut reader = CsvReader::from_string("a\n");
        reader.close();
        reader.close();
        assert!(reader.is_closed());
        assert!(matches!(reader.read_row(), Err(CsvError::Closed)));
    }
}
