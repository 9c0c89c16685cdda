//! Expression AST nodes

use super::operator::Operator;
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Parsed expression
///
/// Evaluation happens in the runtime; this type only carries structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Literal(Value),

    /// Dotted path into the parameter context, e.g. `user.age`
    FieldAccess(Vec<String>),

    /// `[a, b, ...]`
    Array(Vec<Expression>),

    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Call of a built-in function such as `len(x)`
    FunctionCall { name: String, args: Vec<Expression> },
}

/// Prefix operators: `!` and `-`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Negate,
}

impl Expression {
    pub fn literal(value: Value) -> Self {
        Expression::Literal(value)
    }

    pub fn field_access<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expression::FieldAccess(path.into_iter().map(Into::into).collect())
    }

    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn function_call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
        }
    }

    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}
