use super::table::CharClass;

/// Maps characters to their [`CharClass`] for one configured delimiter.
///
/// Each tokenizer owns its own classifier, so exactly one character is a
/// delimiter for a given parse and changing it never affects other readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    delimiter: char,
}

impl Classifier {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    #[inline]
    pub fn classify(&self, ch: char) -> CharClass {
        match ch {
            '"' => CharClass::Quote,
            '\r' => CharClass::CarriageReturn,
            '\n' => CharClass::Newline,
            c if c == self.delimiter => CharClass::Delimiter,
            _ => CharClass::Other,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(',')
    }
}
