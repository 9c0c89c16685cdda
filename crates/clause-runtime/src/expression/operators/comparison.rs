//! Comparison operator execution

use crate::expression::error::{EvalError, EvalResult};
use clause_core::ast::Operator;
use clause_core::Value;
use std::cmp::Ordering;

/// Execute a comparison operation
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> EvalResult<bool> {
    // Null compared to anything returns false so gates degrade on missing parameters
    if left.is_null() || right.is_null() {
        tracing::debug!(
            "Null comparison: {:?} {} {:?}, returning false",
            left,
            op,
            right
        );
        return Ok(false);
    }

    match op {
        // Equality across different types is simply unequal
        Operator::Eq => Ok(left == right),
        Operator::Ne => Ok(left != right),
        Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le => {
            let ordering = left.compare(right).ok_or_else(|| {
                EvalError::InvalidOperation(format!(
                    "Cannot compare {} and {} with {}",
                    left.type_name(),
                    right.type_name(),
                    op
                ))
            })?;
            Ok(match op {
                Operator::Gt => ordering == Ordering::Greater,
                Operator::Ge => ordering != Ordering::Less,
                Operator::Lt => ordering == Ordering::Less,
                _ => ordering != Ordering::Greater,
            })
        }
        _ => Err(EvalError::InvalidOperation(format!(
            "{} is not a comparison operator",
            op
        ))),
    }
}
