//! Character sources feeding the tokenizer

use crate::encoding::Encoding;
use crate::error::Result;
use std::io::BufRead;
use std::str::Chars;

/// Sequential supplier of decoded characters
pub trait CharSource {
    /// Next character, or `Ok(None)` once the source is exhausted
    fn next_char(&mut self) -> Result<Option<char>>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> Result<Option<char>> {
        (**self).next_char()
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn next_char(&mut self) -> Result<Option<char>> {
        (**self).next_char()
    }
}

/// In-memory text
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { chars: text.chars() }
    }

    /// Text not yet consumed
    pub fn remaining(&self) -> &'a str {
        self.chars.as_str()
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Owned in-memory text
#[derive(Debug, Clone)]
pub struct StringSource {
    text: String,
    pos: usize,
}

impl StringSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
        }
    }
}

impl CharSource for StringSource {
    fn next_char(&mut self) -> Result<Option<char>> {
        let next = self.text[self.pos..].chars().next();
        if let Some(ch) = next {
            self.pos += ch.len_utf8();
        }
        Ok(next)
    }
}

/// Byte stream decoded with a declared [`Encoding`]
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    encoding: Encoding,
    bytes_read: u64,
}

impl<R: BufRead> ReadSource<R> {
    pub fn new(reader: R, encoding: Encoding) -> Self {
        Self {
            reader,
            encoding,
            bytes_read: 0,
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Bytes consumed from the underlying reader
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> CharSource for ReadSource<R> {
    fn next_char(&mut self) -> Result<Option<char>> {
        self.encoding
            .decode_char(&mut self.reader, &mut self.bytes_read)
    }
}
