use super::locations::{Location, Span};
use crate::error::LexError;
use const_format::concatcp;
use derivative::Derivative;
use once_cell::sync::Lazy;
use regex::Regex;

/// A lexical unit of an arithmetic expression.
///
/// Numbers keep their source text until evaluation. Two tokens compare equal
/// when type and lexeme agree, wherever they were found in the input.
#[derive(Clone, Default, Debug, Derivative)]
#[derivative(PartialEq)]
pub struct Token {
    pub(crate) typ: TokenType,
    pub(crate) lexeme: String,
    #[derivative(PartialEq = "ignore")]
    pub(crate) span: Span,
}

impl Token {
    pub fn new(typ: TokenType, lexeme: impl Into<String>) -> Self {
        Self {
            typ,
            lexeme: lexeme.into(),
            span: Span::default(),
        }
    }
    pub fn typ(&self) -> TokenType {
        self.typ
    }
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}('{}')", self.typ, self.lexeme)
    }
}

#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenType {
    NUMBER,
    OPERATOR,
    LPAR,
    RPAR,
    ERRORTOKEN,
}

impl Default for TokenType {
    fn default() -> Self {
        Self::ERRORTOKEN
    }
}

const PLUS: (&str, TokenType) = ("+", TokenType::OPERATOR);
const MINUS: (&str, TokenType) = ("-", TokenType::OPERATOR);
const STAR: (&str, TokenType) = ("*", TokenType::OPERATOR);
const SLASH: (&str, TokenType) = ("/", TokenType::OPERATOR);
const LPAR: (&str, TokenType) = ("(", TokenType::LPAR);
const RPAR: (&str, TokenType) = (")", TokenType::RPAR);

const SIMPLE_TOKENS: [(&str, TokenType); 6] = [PLUS, MINUS, STAR, SLASH, LPAR, RPAR];

macro_rules! alternative {
    ($t:expr) => {{
        $t
    }};
    ($t:expr, $($ts:expr),+) => {{
        concatcp!($t, "|", alternative!($($ts),+))
    }}
}

macro_rules! group {
    ($($ts:expr),+) => {{
        concatcp!(r"(", alternative!($($ts),+), ")")
    }}
}

const S_WHITESPACE: &str = r"^\s+";
const S_DIGIT: &str = r"[0-9]";
const S_POINT: &str = r"\.";
// No shape check here: "1.2.3" is one token and fails when evaluated.
const S_NUMBER: &str = concatcp!(r"^", group!(S_DIGIT, S_POINT), r"+");

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHITESPACE).expect("Error compiling regex."));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(S_NUMBER).expect("Error compiling regex."));

/// Outcome of feeding lines to a [`Tokenizer`].
#[derive(Debug, PartialEq)]
pub enum ParserState {
    Ok,
    /// More `(` than `)` so far; an interactive caller should read on.
    ContinuationNeeded,
    Error(LexError),
}

#[derive(Default)]
pub struct Tokenizer {
    tokens: Vec<Token>,
    start: usize,
    lineno: usize,
    paren_lvl: isize,
    // Whitespace does not end a number: "1 2" is read as "12".
    in_number: bool,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes `input` line by line, appending to the tokens collected by
    /// earlier calls. Stops at the first invalid character.
    pub fn tokenize<I, S>(&mut self, input: I) -> ParserState
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in input {
            if let Err(err) = self.tokenize_line(line.as_ref()) {
                return ParserState::Error(err);
            }
            self.lineno += 1;
        }
        if self.paren_lvl > 0 {
            return ParserState::ContinuationNeeded;
        }
        ParserState::Ok
    }

    pub fn finalize(self) -> Vec<Token> {
        self.tokens
    }

    fn tokenize_line(&mut self, line: &str) -> Result<(), LexError> {
        self.start = 0;

        while self.start < line.len() {
            if let Some(m) = WHITESPACE.find(&line[self.start..]) {
                self.start += m.end();
                continue;
            }
            if let Some(m) = NUMBER.find(&line[self.start..]) {
                self.push_digits(m.as_str());
                continue;
            }
            if self.find_simple_token(line) {
                continue;
            }
            if let Some(chr) = line[self.start..].chars().next() {
                return Err(LexError::InvalidCharacter(
                    chr,
                    Location::new(self.lineno, self.start),
                ));
            }
        }
        Ok(())
    }

    fn push(&mut self, typ: TokenType, lexeme: &str) {
        let end = self.start + lexeme.len();
        self.tokens.push(Token {
            typ,
            lexeme: lexeme.to_string(),
            span: Span::new(self.lineno, self.start, self.lineno, end),
        });
        self.start = end;
    }

    fn find_simple_token(&mut self, line: &str) -> bool {
        for (lexeme, tok_type) in SIMPLE_TOKENS {
            if line[self.start..].starts_with(lexeme) {
                self.push(tok_type, lexeme);
                self.in_number = false;
                match tok_type {
                    TokenType::LPAR => self.paren_lvl += 1,
                    TokenType::RPAR => self.paren_lvl -= 1,
                    _ => {}
                }
                return true;
            }
        }
        false
    }

    fn push_digits(&mut self, digits: &str) {
        if self.in_number {
            if let Some(last) = self.tokens.last_mut() {
                let end = self.start + digits.len();
                last.lexeme.push_str(digits);
                last.span.end = Location::new(self.lineno, end);
                self.start = end;
                return;
            }
        }
        self.push(TokenType::NUMBER, digits);
        self.in_number = true;
    }
}

/// Splits a complete expression into tokens. Line breaks count as
/// whitespace.
pub fn tokenize_string(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokenizer = Tokenizer::new();
    match tokenizer.tokenize(input.lines()) {
        ParserState::Error(err) => Err(err),
        ParserState::Ok | ParserState::ContinuationNeeded => Ok(tokenizer.finalize()),
    }
}
