//! Table-driven row tokenizer
//!
//! Reads one character at a time from a [`CharSource`] and returns one row per
//! call. Quoted fields may contain delimiters, line breaks and escaped quotes
//! (`""`). A bare `\r` outside quotes is dropped; only `\n` ends a row.

use super::classifier::Classifier;
use super::source::CharSource;
use super::table::{LiveState, Operation, TransitionTable};
use crate::error::{CsvError, Result};
use crate::types::Row;

/// Pull-based CSV row tokenizer
///
/// # Examples
///
/// ```
/// use csvrow::csv::{RowTokenizer, StrSource};
///
/// let mut tokenizer = RowTokenizer::new(StrSource::new("\"a,b\",c\n"), ',');
/// assert_eq!(tokenizer.next_row().unwrap(), Some(vec!["a,b".to_string(), "c".to_string()]));
/// assert_eq!(tokenizer.next_row().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct RowTokenizer<S> {
    source: S,
    classifier: Classifier,
    table: &'static TransitionTable,
    buffer: String,
    rows_started: u64,
}

impl<S: CharSource> RowTokenizer<S> {
    /// Create a tokenizer reading from `source` with the given delimiter
    pub fn new(source: S, delimiter: char) -> Self {
        Self {
            source,
            classifier: Classifier::new(delimiter),
            table: TransitionTable::shared(),
            buffer: String::with_capacity(64),
            rows_started: 0,
        }
    }

    pub fn delimiter(&self) -> char {
        self.classifier.delimiter()
    }

    /// Number of rows begun so far, including rejected ones
    pub fn rows_started(&self) -> u64 {
        self.rows_started
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Read the next row.
    ///
    /// Returns `Ok(None)` only when the source is exhausted before the first
    /// character of the call. A final row without a trailing line break is
    /// returned as a complete row. On [`CsvError::Malformed`] the row is
    /// abandoned; the next call resumes right after the offending character.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        let Some(mut ch) = self.source.next_char()? else {
            return Ok(None);
        };

        self.rows_started += 1;
        self.buffer.clear();
        let mut row = Row::new();
        let mut state = LiveState::NotEscaped;
        let mut offset: u64 = 0;

        loop {
            offset += 1;
            let class = self.classifier.classify(ch);
            let transition = self.table.get(class, state);

            match transition.op {
                Operation::Append | Operation::None => {
                    if transition.op == Operation::Append {
                        self.buffer.push(ch);
                    }
                    debug_assert!(transition.next.is_live(), "{transition:?} leaves the automaton");
                    state = transition.next.live().unwrap_or(LiveState::NotEscaped);
                }
                Operation::WriteField => {
                    row.push(std::mem::take(&mut self.buffer));
                    // overrides the table's EndOfField target
                    state = LiveState::NotEscaped;
                }
                Operation::WriteRow => {
                    row.push(std::mem::take(&mut self.buffer));
                    tracing::trace!(row = self.rows_started, fields = row.len(), "row complete");
                    return Ok(Some(row));
                }
                Operation::Fail => {
                    self.buffer.clear();
                    tracing::warn!(row = self.rows_started, offset, "malformed CSV row");
                    return Err(CsvError::Malformed {
                        row: self.rows_started,
                        offset,
                    });
                }
            }

            match self.source.next_char()? {
                Some(next) => ch = next,
                None => break,
            }
        }

        // end of input without a trailing line break
        row.push(std::mem::take(&mut self.buffer));
        tracing::trace!(row = self.rows_started, fields = row.len(), "final row at end of input");
        Ok(Some(row))
    }
}

impl<S: CharSource> Iterator for RowTokenizer<S> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}
