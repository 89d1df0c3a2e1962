use crate::error::EvalError;
use crate::parser::{Locatable, Span, Token, TokenType};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn priority(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }

    fn apply(self, left: f64, right: f64) -> Option<f64> {
        match self {
            Self::Add => Some(left + right),
            Self::Subtract => Some(left - right),
            Self::Multiply => Some(left * right),
            // Exact comparison: only a true zero divisor is rejected.
            Self::Divide if right == 0.0 => None,
            Self::Divide => Some(left / right),
        }
    }
}

/// Entry of the operator stack. Barriers are open parentheses; reductions
/// never cross them.
#[derive(Clone, Copy, Debug)]
enum Pending {
    Barrier(Span),
    Operator(BinaryOperator, Span),
}

#[derive(Default)]
struct Stacks {
    values: Vec<f64>,
    operators: Vec<Pending>,
}

impl Stacks {
    /// Pops two operands and the topmost operator and pushes the result.
    fn reduce(&mut self) -> Result<(), EvalError> {
        if self.values.len() < 2 {
            return Err(EvalError::InvalidExpression);
        }
        let Some(Pending::Operator(op, span)) = self.operators.pop() else {
            return Err(EvalError::InvalidExpression);
        };
        let (Some(right), Some(left)) = (self.values.pop(), self.values.pop()) else {
            return Err(EvalError::InvalidExpression);
        };
        let result = op.apply(left, right).ok_or(EvalError::DivisionByZero(span))?;
        self.values.push(result);
        Ok(())
    }

    fn close_group(&mut self, closing: Span) -> Result<(), EvalError> {
        loop {
            match self.operators.last().copied() {
                Some(Pending::Operator(..)) => self.reduce()?,
                Some(Pending::Barrier(_)) => {
                    self.operators.pop();
                    return Ok(());
                }
                None => return Err(EvalError::MismatchedParentheses(closing)),
            }
        }
    }

    /// Reduces pending operators that bind at least as tight as `op`, which
    /// makes equal priorities associate to the left.
    fn push_operator(&mut self, op: BinaryOperator, span: Span) -> Result<(), EvalError> {
        while let Some(Pending::Operator(top, _)) = self.operators.last().copied() {
            if top.priority() < op.priority() {
                break;
            }
            self.reduce()?;
        }
        self.operators.push(Pending::Operator(op, span));
        Ok(())
    }

    fn finish(mut self) -> Result<f64, EvalError> {
        while let Some(&top) = self.operators.last() {
            match top {
                Pending::Operator(..) => self.reduce()?,
                Pending::Barrier(span) => return Err(EvalError::MismatchedParentheses(span)),
            }
        }
        match self.values.as_slice() {
            [value] => Ok(*value),
            _ => Err(EvalError::InvalidExpression),
        }
    }
}

/// Parses a number lexeme. Literals too large for an `f64` are rejected
/// rather than rounded to infinity; only an explicit `inf` spelling yields one.
fn parse_number(lexeme: &str) -> Option<f64> {
    let value = lexeme.parse::<f64>().ok()?;
    if value.is_infinite() && !lexeme.to_ascii_lowercase().contains("inf") {
        return None;
    }
    Some(value)
}

/// Evaluates an infix token sequence in a single left-to-right pass.
///
/// Operands and pending operators live on two stacks local to the call. A
/// pending operator is reduced as soon as one of lower or equal priority
/// arrives, a `)` reduces back to its matching `(`, and whatever is left is
/// reduced at the end. The first failure aborts evaluation.
///
/// Unary signs are not part of the grammar: `-1` fails with
/// [`EvalError::InvalidExpression`] because the reduction finds a single
/// operand.
pub fn evaluate(tokens: &[Token]) -> Result<f64, EvalError> {
    let mut stacks = Stacks::default();

    for token in tokens {
        match token.typ {
            TokenType::NUMBER => {
                let value = parse_number(&token.lexeme).ok_or_else(|| {
                    EvalError::MalformedNumber(token.lexeme.clone(), token.span())
                })?;
                stacks.values.push(value);
            }
            TokenType::LPAR => stacks.operators.push(Pending::Barrier(token.span())),
            TokenType::RPAR => stacks.close_group(token.span())?,
            TokenType::OPERATOR => {
                let op = BinaryOperator::from_symbol(&token.lexeme).ok_or_else(|| {
                    EvalError::UnknownOperator(token.lexeme.clone(), token.span())
                })?;
                stacks.push_operator(op, token.span())?;
            }
            TokenType::ERRORTOKEN => {
                return Err(EvalError::UnknownToken(token.lexeme.clone(), token.span()))
            }
        }
    }

    stacks.finish()
}
