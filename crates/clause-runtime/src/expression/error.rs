//! Expression evaluation errors

use clause_parser::ParseError;
use thiserror::Error;

/// Failure while parsing or evaluating a single expression
#[derive(Error, Debug)]
pub enum EvalError {
    /// Expression or template failed to parse
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Operand of the wrong type
    #[error("Type error: {0}")]
    TypeError(String),

    /// Operator not applicable to the operands
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Call to a function that does not exist
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Call with the wrong number of arguments
    #[error("Function '{name}' expects {expected} argument(s), got {actual}")]
    FunctionArity {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Strict-path expression failure, carrying the offending expression text
#[derive(Error, Debug)]
#[error("Failed to evaluate expression '{expression}': {cause}")]
pub struct ExpressionError {
    pub expression: String,
    pub cause: EvalError,
}

impl ExpressionError {
    pub fn new(expression: impl Into<String>, cause: impl Into<EvalError>) -> Self {
        Self {
            expression: expression.into(),
            cause: cause.into(),
        }
    }
}

pub type EvalResult<T> = std::result::Result<T, EvalError>;
