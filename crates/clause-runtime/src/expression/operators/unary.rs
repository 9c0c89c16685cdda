//! Unary operator execution

use crate::expression::error::{EvalError, EvalResult};
use clause_core::ast::UnaryOperator;
use clause_core::Value;

/// Execute a unary operation
///
/// `!null` is `true` (null counts as false in logic); `-null` stays null.
pub(crate) fn execute_unary_op(operand: &Value, op: &UnaryOperator) -> EvalResult<Value> {
    match (op, operand) {
        (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOperator::Not, Value::Null) => Ok(Value::Bool(true)),
        (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOperator::Negate, Value::Null) => Ok(Value::Null),
        _ => Err(EvalError::TypeError(format!(
            "Cannot apply {:?} to {}",
            op,
            operand.type_name()
        ))),
    }
}
