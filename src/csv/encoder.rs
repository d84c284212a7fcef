//! CSV encoding with RFC 4180-like quoting

const QUOTE: char = '"';

/// CSV encoder for writing properly quoted rows
///
/// Stateless between rows: every call encodes its row independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvEncoder {
    delimiter: char,
}

impl CsvEncoder {
    /// Create a new CSV encoder with a custom delimiter
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Encode an entire row into `buffer`, without the line terminator
    pub fn encode_row<I, S>(&self, fields: I, buffer: &mut String)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                buffer.push(self.delimiter);
            }
            self.encode_field(field.as_ref(), buffer);
        }
    }

    /// Encode single field with proper quoting/escaping
    pub fn encode_field(&self, field: &str, buffer: &mut String) {
        if !self.needs_quoting(field) {
            buffer.push_str(field);
            return;
        }

        buffer.push(QUOTE);
        for ch in field.chars() {
            if ch == QUOTE {
                // " -> ""
                buffer.push(QUOTE);
            }
            buffer.push(ch);
        }
        buffer.push(QUOTE);
    }

    /// Check if field requires quoting
    pub fn needs_quoting(&self, field: &str) -> bool {
        field
            .chars()
            .any(|c| c == self.delimiter || matches!(c, '"' | '\'' | '\n' | '\r'))
    }
}

impl Default for CsvEncoder {
    fn default() -> Self {
        Self::new(',')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(encoder: &CsvEncoder, fields: &[&str]) -> String {
        let mut buffer = String::new();
        encoder.encode_row(fields, &mut buffer);
        buffer
    }

    #[test]
    fn test_simple_fields() {
        assert_eq!(encode(&CsvEncoder::default(), &["a", "b", "c"]), "a,b,c");
    }

    #[test]
    fn test_quoted_fields() {
        assert_eq!(encode(&CsvEncoder::default(), &["a,b", "c"]), r#""a,b",c"#);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(
            encode(&CsvEncoder::default(), &[r#"Say "Hello""#, "world"]),
            r#""Say ""Hello""",world"#
        );
    }

    #[test]
    fn test_single_quote_forces_quoting() {
        assert_eq!(encode(&CsvEncoder::default(), &["it's"]), r#""it's""#);
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(
            encode(&CsvEncoder::default(), &["Line 1\nLine 2", "a\rb"]),
            "\"Line 1\nLine 2\",\"a\rb\""
        );
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(encode(&CsvEncoder::default(), &["a", "", "c"]), "a,,c");
        assert_eq!(encode(&CsvEncoder::default(), &["", "", ""]), ",,");
    }

    #[test]
    fn test_custom_delimiter() {
        let encoder = CsvEncoder::new(';');
        assert_eq!(encode(&encoder, &["a", "b;c", "d,e"]), r#"a;"b;c";d,e"#);
    }
}
