//! CSV tokenizing and encoding core

mod classifier;
mod encoder;
mod source;
mod table;
mod tokenizer;

pub use classifier::Classifier;
pub use encoder::CsvEncoder;
pub use source::{CharSource, ReadSource, StrSource, StringSource};
pub use table::{CharClass, LiveState, Operation, State, Transition, TransitionTable};
pub use tokenizer::RowTokenizer;
