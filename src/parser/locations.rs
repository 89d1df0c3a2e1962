use super::tokenizer::Token;

/// A zero-based position in the input: line number and byte column.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}

pub trait Locatable {
    fn span(&self) -> Span;
}

/// Half-open range of input covered by a token.
///
/// Tokens built by hand (rather than by the tokenizer) carry the default
/// span, which starts and ends at the beginning of the input.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start: Location::new(start_line, start_col),
            end: Location::new(end_line, end_col),
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)
    }
}

impl Locatable for Token {
    fn span(&self) -> Span {
        self.span
    }
}
