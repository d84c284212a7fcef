//! CSV writing, one row at a time

use crate::config::CsvConfig;
use crate::csv::CsvEncoder;
use crate::encoding::Encoding;
use crate::error::{CsvError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const LINE_ENDING: char = '\n';

/// Serialize one row to CSV text, terminated by a line break
///
/// # Examples
///
/// ```
/// use csvrow::serialize_row;
///
/// assert_eq!(serialize_row(["a", "b,c", "say \"hi\""], ','), "a,\"b,c\",\"say \"\"hi\"\"\"\n");
/// ```
pub fn serialize_row<I, S>(fields: I, delimiter: char) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    CsvEncoder::new(delimiter).encode_row(fields, &mut line);
    line.push(LINE_ENDING);
    line
}

/// CSV writer streaming rows to a file or any byte sink
///
/// Each row is encoded independently and written as one terminated line.
///
/// # Examples
///
/// ```no_run
/// use csvrow::CsvWriter;
///
/// let mut writer = CsvWriter::new("output.csv").unwrap();
/// writer.write_row(["Name", "Age", "City"]).unwrap();
/// writer.write_row(["Alice", "30", "New York, NY"]).unwrap();
/// writer.save().unwrap();
/// ```
///
/// # In memory
///
/// ```
/// use csvrow::CsvWriter;
///
/// let mut writer = CsvWriter::in_memory();
/// writer.write_row(["a", "it's"]).unwrap();
/// assert_eq!(writer.into_string().unwrap(), "a,\"it's\"\n");
/// ```
#[derive(Debug)]
pub struct CsvWriter<W: Write = BufWriter<File>> {
    // None once closed
    writer: Option<W>,
    encoder: CsvEncoder,
    encoding: Encoding,

    // Reused per row
    line: String,
    bytes: Vec<u8>,

    row_count: u64,
}

impl CsvWriter<BufWriter<File>> {
    /// Create (or truncate) a CSV file with the default configuration
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with(path, CsvConfig::default())
    }

    /// Create (or truncate) a CSV file, encoding it with `config.encoding`
    pub fn create_with<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Self> {
        config.validate()?;
        let path_ref = path.as_ref();
        let file = File::create(path_ref).map_err(|e| {
            CsvError::WriteError(format!(
                "Failed to create CSV file {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path_ref.display(), delimiter = ?config.delimiter, encoding = %config.encoding, "created CSV file");
        Ok(Self::build(BufWriter::new(file), &config))
    }
}

impl CsvWriter<Vec<u8>> {
    /// Writer collecting output in memory, see [`CsvWriter::into_string`]
    pub fn in_memory() -> Self {
        Self::build(Vec::new(), &CsvConfig::default())
    }

    /// In-memory writer with custom configuration
    pub fn in_memory_with(config: CsvConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(Vec::new(), &config))
    }

    /// Decode everything written so far into a `String`
    pub fn into_string(self) -> Result<String> {
        let encoding = self.encoding;
        let bytes = self.into_inner()?;
        match encoding {
            Encoding::Utf8 => String::from_utf8(bytes).map_err(|e| CsvError::Decode {
                encoding,
                offset: e.utf8_error().valid_up_to() as u64,
            }),
            Encoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl<W: Write> CsvWriter<W> {
    /// Write to any byte sink with the default configuration
    pub fn from_writer(writer: W) -> Self {
        Self::build(writer, &CsvConfig::default())
    }

    /// Write to any byte sink, encoding with `config.encoding`
    pub fn from_writer_with(writer: W, config: CsvConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(writer, &config))
    }

    fn build(writer: W, config: &CsvConfig) -> Self {
        CsvWriter {
            writer: Some(writer),
            encoder: CsvEncoder::new(config.delimiter),
            encoding: config.encoding,
            line: String::with_capacity(256),
            bytes: Vec::with_capacity(256),
            row_count: 0,
        }
    }

    pub fn delimiter(&self) -> char {
        self.encoder.delimiter()
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Write a row of strings
    ///
    /// An empty row is written as a bare line break.
    pub fn write_row<I, S>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let writer = self.writer.as_mut().ok_or(CsvError::Closed)?;

        self.line.clear();
        self.encoder.encode_row(fields, &mut self.line);
        self.line.push(LINE_ENDING);

        self.bytes.clear();
        self.encoding.encode_into(&self.line, &mut self.bytes)?;
        writer.write_all(&self.bytes)?;

        self.row_count += 1;
        Ok(())
    }

    /// Write multiple rows at once
    pub fn write_rows_batch<I, R, S>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Get the number of rows written
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        let writer = self.writer.as_mut().ok_or(CsvError::Closed)?;
        writer.flush()?;
        Ok(())
    }

    /// Flush and finish writing, consuming the writer
    pub fn save(mut self) -> Result<()> {
        self.close()
    }

    /// Flush and release the sink. Later calls are no-ops.
    pub fn close(&mut self) -> Result<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        tracing::debug!(rows = self.row_count, "closing CSV writer");
        writer.flush()?;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Flush and return the underlying sink
    pub fn into_inner(mut self) -> Result<W> {
        let mut writer = self.writer.take().ok_or(CsvError::Closed)?;
        writer.flush()?;
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_plain_csv() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("output.csv");
        {
            let mut writer = CsvWriter::new(&path)?;
            writer.write_row(["Name", "Age", "City"])?;
            writer.write_row(["Alice", "30", "NYC"])?;
            assert_eq!(writer.row_count(), 2);
            writer.save()?;
        }

        let content = std::fs::read_to_string(&path)?;
        assert_eq!(content, "Name,Age,City\nAlice,30,NYC\n");
        Ok(())
    }

    #[test]
    fn test_edge_cases() -> Result<()> {
        let mut writer = CsvWriter::in_memory();
        writer.write_row(["a,b", r#"Say "Hi""#, "Line1\nLine2", ""])?;
        assert_eq!(
            writer.into_string()?,
            "\"a,b\",\"Say \"\"Hi\"\"\",\"Line1\nLine2\",\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_row() -> Result<()> {
        let mut writer = CsvWriter::in_memory();
        writer.write_row(Vec::<String>::new())?;
        writer.write_row([""])?;
        assert_eq!(writer.into_string()?, "\n\n");
        Ok(())
    }

    #[test]
    fn test_custom_delimiter() -> Result<()> {
        let mut writer = CsvWriter::in_memory_with(CsvConfig::new().delimiter('\t'))?;
        writer.write_rows_batch(vec![vec!["a", "b\tc"], vec!["d,e", "f"]])?;
        assert_eq!(writer.into_string()?, "a\t\"b\tc\"\nd,e\tf\n");
        Ok(())
    }

    #[test]
    fn test_latin1_output() -> Result<()> {
        let config = CsvConfig::new().encoding(Encoding::Latin1);
        let mut writer = CsvWriter::from_writer_with(Vec::new(), config)?;
        writer.write_row(["café"])?;
        assert_eq!(writer.into_inner()?, b"caf\xE9\n");

        let mut writer = CsvWriter::from_writer_with(Vec::new(), config)?;
        assert!(matches!(
            writer.write_row(["€"]),
            Err(CsvError::Unencodable { ch: '€', .. })
        ));
        assert_eq!(writer.row_count(), 0);
        Ok(())
    }

    #[test]
    fn test_close_is_idempotent() -> Result<()> {
        let mut writer = CsvWriter::in_memory();
        writer.write_row(["a"])?;
        writer.close()?;
        writer.close()?;
        assert!(writer.is_closed());
        assert!(matches!(writer.write_row(["b"]), Err(CsvError::Closed)));
        Ok(())
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        let mut writer = CsvWriter::from_writer(BrokenSink);
        assert!(matches!(writer.write_row(["a"]), Err(CsvError::Io(_))));
        assert_eq!(writer.row_count(), 0);
    }

    #[test]
    fn test_create_in_missing_directory() {
        let err = CsvWriter::new("/nonexistent/dir/out.csv").unwrap_err();
        assert!(matches!(err, CsvError::WriteError(_)));
    }

    #[test]
    fn test_serialize_row() {
        assert_eq!(serialize_row(["x", "y"], ';'), "x;y\n");
        assert_eq!(serialize_row(Vec::<&str>::new(), ','), "\n");
    }
}
