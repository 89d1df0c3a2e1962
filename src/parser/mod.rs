mod locations;
pub mod tokenizer;

pub use locations::{Locatable, Location, Span};
pub use tokenizer::{tokenize_string, ParserState, Token, TokenType, Tokenizer};

#[cfg(test)]
mod test;
