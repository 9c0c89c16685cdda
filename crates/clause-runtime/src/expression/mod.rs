//! Expression evaluation
//!
//! Evaluates match expressions, value expressions and templates against a
//! [`ParameterContext`](crate::context::ParameterContext).

mod error;
mod evaluator;
mod functions;
mod operators;

pub use error::{EvalError, EvalResult, ExpressionError};
pub use evaluator::ExpressionEvaluator;
