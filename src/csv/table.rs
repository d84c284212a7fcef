//! Transition table for the row tokenizer
//!
//! The automaton is keyed by `(CharClass, LiveState)` and yields the next state
//! together with the side effect to perform on the field buffer. Only the five
//! live states appear as keys; `EndOfField`, `EndOfRow` and `Illegal` are
//! effect markers that the tokenizer resolves immediately.

/// Classification of an input character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Quote,
    Delimiter,
    CarriageReturn,
    Newline,
    Other,
}

impl CharClass {
    pub const ALL: [CharClass; 5] = [
        CharClass::Quote,
        CharClass::Delimiter,
        CharClass::CarriageReturn,
        CharClass::Newline,
        CharClass::Other,
    ];
}

/// Tokenizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Scanning outside quotes; initial state of every field
    NotEscaped,
    EndOfRow,
    EndOfField,
    Illegal,
    /// Opening quote seen, nothing else yet
    OneQuote,
    /// Quote seen inside a quoted field: closing quote or first half of `""`
    DoubleQuotes,
    /// Content seen inside a quoted field
    QuoteNotQuotes,
    /// Quote seen after content inside a quoted field
    QuoteNotQuotesQuote,
}

impl State {
    /// The table key for this state, `None` for the effect markers
    pub const fn live(self) -> Option<LiveState> {
        match self {
            State::NotEscaped => Some(LiveState::NotEscaped),
            State::OneQuote => Some(LiveState::OneQuote),
            State::QuoteNotQuotes => Some(LiveState::QuoteNotQuotes),
            State::DoubleQuotes => Some(LiveState::DoubleQuotes),
            State::QuoteNotQuotesQuote => Some(LiveState::QuoteNotQuotesQuote),
            State::EndOfRow | State::EndOfField | State::Illegal => None,
        }
    }

    pub fn is_live(self) -> bool {
        self.live().is_some()
    }
}

/// The states carried between characters; the keys of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveState {
    NotEscaped = 0,
    OneQuote = 1,
    QuoteNotQuotes = 2,
    DoubleQuotes = 3,
    QuoteNotQuotesQuote = 4,
}

impl LiveState {
    pub const ALL: [LiveState; 5] = [
        LiveState::NotEscaped,
        LiveState::OneQuote,
        LiveState::QuoteNotQuotes,
        LiveState::DoubleQuotes,
        LiveState::QuoteNotQuotesQuote,
    ];
}

impl From<LiveState> for State {
    fn from(state: LiveState) -> Self {
        match state {
            LiveState::NotEscaped => State::NotEscaped,
            LiveState::OneQuote => State::OneQuote,
            LiveState::QuoteNotQuotes => State::QuoteNotQuotes,
            LiveState::DoubleQuotes => State::DoubleQuotes,
            LiveState::QuoteNotQuotesQuote => State::QuoteNotQuotesQuote,
        }
    }
}

/// Side effect of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Push the current character onto the field buffer
    Append,
    /// Finish the field and reset to `NotEscaped`
    WriteField,
    /// Finish the field and emit the row
    WriteRow,
    /// Reject the row
    Fail,
    /// Consume the character without touching the buffer
    None,
}

/// Target of one table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: State,
    pub op: Operation,
}

const fn to(next: State, op: Operation) -> Transition {
    Transition { next, op }
}

/// Immutable `(CharClass, LiveState) -> Transition` lookup
#[derive(Debug)]
pub struct TransitionTable {
    // [class][live state], state order as in `LiveState::ALL`
    cells: [[Transition; 5]; 5],
}

static TABLE: TransitionTable = TransitionTable::build();

impl TransitionTable {
    /// The process-wide table, shared by every tokenizer
    pub fn shared() -> &'static TransitionTable {
        &TABLE
    }

    const fn build() -> Self {
        use Operation::{Append, Fail, WriteField, WriteRow};
        use State::*;
        const SKIP: Operation = Operation::None;

        Self {
            cells: [
                // Quote
                [
                    to(OneQuote, SKIP),
                    to(DoubleQuotes, SKIP),
                    to(QuoteNotQuotesQuote, SKIP),
                    to(OneQuote, Append),
                    to(OneQuote, Append),
                ],
                // Delimiter
                [
                    to(EndOfField, WriteField),
                    to(QuoteNotQuotes, Append),
                    to(QuoteNotQuotes, Append),
                    to(EndOfField, WriteField),
                    to(EndOfField, WriteField),
                ],
                // CarriageReturn
                [
                    to(NotEscaped, SKIP),
                    to(QuoteNotQuotes, Append),
                    to(QuoteNotQuotes, Append),
                    to(DoubleQuotes, SKIP),
                    to(QuoteNotQuotesQuote, SKIP),
                ],
                // Newline
                [
                    to(EndOfRow, WriteRow),
                    to(QuoteNotQuotes, Append),
                    to(QuoteNotQuotes, Append),
                    to(EndOfRow, WriteRow),
                    to(EndOfRow, WriteRow),
                ],
                // Other
                [
                    to(NotEscaped, Append),
                    to(QuoteNotQuotes, Append),
                    to(QuoteNotQuotes, Append),
                    to(Illegal, Fail),
                    to(Illegal, Fail),
                ],
            ],
        }
    }

    /// Look up the transition for a character class in a live state
    pub fn get(&self, class: CharClass, state: LiveState) -> Transition {
        let row = match class {
            CharClass::Quote => 0,
            CharClass::Delimiter => 1,
            CharClass::CarriageReturn => 2,
            CharClass::Newline => 3,
            CharClass::Other => 4,
        };
        self.cells[row][state as usize]
    }
}
