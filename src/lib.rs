mod error;
pub use error::{Error, EvalError, LexError};

mod parser;
pub use parser::{
    tokenize_string, Locatable, Location, ParserState, Span, Token, TokenType, Tokenizer,
};

mod interpreter;
pub use interpreter::{evaluate, BinaryOperator};

/// Tokenizes and evaluates `expression`, e.g. `"(2 + 3) * 4"` gives `20.0`.
pub fn calculate(expression: &str) -> Result<f64, Error> {
    let tokens = tokenize_string(expression)?;
    Ok(evaluate(&tokens)?)
}
