use thiserror::Error;

use crate::parser::{Location, Span};

/// Raised while splitting the input into tokens. The whole expression is
/// rejected, no tokens are handed out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("invalid character in expression: '{0}' at {1}")]
    InvalidCharacter(char, Location),
}

/// Raised while reducing a token sequence to a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("malformed number '{0}' at {1}")]
    MalformedNumber(String, Span),
    #[error("mismatched parentheses at {0}")]
    MismatchedParentheses(Span),
    #[error("division by zero at {0}")]
    DivisionByZero(Span),
    #[error("invalid expression")]
    InvalidExpression,
    #[error("unknown operator '{0}' at {1}")]
    UnknownOperator(String, Span),
    #[error("unknown token '{0}' at {1}")]
    UnknownToken(String, Span),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
