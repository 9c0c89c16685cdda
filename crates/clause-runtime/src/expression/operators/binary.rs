//! Binary operator execution
//!
//! Arithmetic, string and membership operators. Comparisons live in
//! `comparison`, and `&&`/`||` are short-circuited by the evaluator.

use crate::expression::error::{EvalError, EvalResult};
use clause_core::ast::Operator;
use clause_core::Value;

/// Execute a binary operation
pub(crate) fn execute_binary_op(left: &Value, op: &Operator, right: &Value) -> EvalResult<Value> {
    // A string on either side of `+` concatenates, rendering null as `null`
    if let (Value::String(_), Operator::Add, _) | (_, Operator::Add, Value::String(_)) =
        (left, op, right)
    {
        return Ok(Value::String(format!("{left}{right}")));
    }

    // Any other operation on null returns Null so missing parameters propagate
    if left.is_null() || right.is_null() {
        tracing::debug!(
            "Null in binary operation: {:?} {} {:?}, returning Null",
            left,
            op,
            right
        );
        return Ok(Value::Null);
    }

    match (left, op, right) {
        // Arithmetic operations
        (Value::Number(l), Operator::Add, Value::Number(r)) => Ok(Value::Number(l + r)),
        (Value::Number(l), Operator::Sub, Value::Number(r)) => Ok(Value::Number(l - r)),
        (Value::Number(l), Operator::Mul, Value::Number(r)) => Ok(Value::Number(l * r)),
        (Value::Number(l), Operator::Div, Value::Number(r)) => {
            if *r == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Number(l / r))
            }
        }
        (Value::Number(l), Operator::Mod, Value::Number(r)) => {
            if *r == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Number(l % r))
            }
        }

        // String operations
        (Value::String(l), Operator::Contains, Value::String(r)) => {
            Ok(Value::Bool(l.contains(r.as_str())))
        }
        (Value::String(l), Operator::StartsWith, Value::String(r)) => {
            Ok(Value::Bool(l.starts_with(r.as_str())))
        }
        (Value::String(l), Operator::EndsWith, Value::String(r)) => {
            Ok(Value::Bool(l.ends_with(r.as_str())))
        }

        // Array operations
        (Value::Array(arr), Operator::Contains, val) => {
            Ok(Value::Bool(arr.iter().any(|v| v == val)))
        }

        // In operator
        (val, Operator::In, Value::Array(arr)) => Ok(Value::Bool(arr.iter().any(|v| v == val))),
        (val, Operator::NotIn, Value::Array(arr)) => {
            Ok(Value::Bool(!arr.iter().any(|v| v == val)))
        }

        _ => Err(EvalError::InvalidOperation(format!(
            "Cannot apply {} to {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ))),
    }
}
