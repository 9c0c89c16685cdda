//! Expression evaluator
//!
//! Two strictness levels over the same tree walker:
//! - soft (`eval_soft`): expression failures are logged and collapse to `None`
//! - strict (`eval_strict`, `eval_template`, `is_match`): failures surface as
//!   [`ExpressionError`]

use super::error::{EvalError, EvalResult, ExpressionError};
use super::functions::call_function;
use super::operators::{execute_binary_op, execute_compare, execute_unary_op};
use crate::context::ParameterContext;
use clause_core::ast::{Expression, Operator, Template, TemplateSegment};
use clause_core::Value;
use clause_parser::{ExpressionParser, TemplateParser};

/// Stateless expression evaluator
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    /// Evaluate `expr`, logging and discarding any expression failure
    ///
    /// Returns `None` on failure and when the expression evaluates to null.
    pub fn eval_soft(expr: &str, ctx: &ParameterContext) -> Option<Value> {
        match Self::eval_strict(expr, ctx) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(
                    expression = %err.expression,
                    error = %err.cause,
                    "Expression evaluation failed, treating value as absent"
                );
                None
            }
        }
    }

    /// Evaluate `expr`, failing with the expression text attached
    pub fn eval_strict(expr: &str, ctx: &ParameterContext) -> Result<Value, ExpressionError> {
        ExpressionParser::parse(expr)
            .map_err(EvalError::from)
            .and_then(|ast| Self::evaluate(&ast, ctx))
            .map_err(|cause| ExpressionError::new(expr, cause))
    }

    /// Render a template such as `%@{name}%`; all or nothing
    pub fn eval_template(template: &str, ctx: &ParameterContext) -> Result<String, ExpressionError> {
        TemplateParser::parse(template)
            .map_err(EvalError::from)
            .and_then(|parsed| Self::render(&parsed, ctx))
            .map_err(|cause| ExpressionError::new(template, cause))
    }

    /// Gate check: blank means always include, otherwise only a literal `true` passes
    pub fn is_match(match_expr: &str, ctx: &ParameterContext) -> Result<bool, ExpressionError> {
        if match_expr.trim().is_empty() {
            return Ok(true);
        }
        let value = Self::eval_strict(match_expr, ctx)?;
        tracing::debug!("Match '{}' evaluated to {:?}", match_expr, value);
        Ok(Self::is_true(&value))
    }

    pub fn is_not_match(match_expr: &str, ctx: &ParameterContext) -> Result<bool, ExpressionError> {
        Self::is_match(match_expr, ctx).map(|matched| !matched)
    }

    /// Only `Value::Bool(true)` counts as true
    pub fn is_true(value: &Value) -> bool {
        matches!(value, Value::Bool(true))
    }

    /// Evaluate a parsed expression
    pub fn evaluate(expr: &Expression, ctx: &ParameterContext) -> EvalResult<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::FieldAccess(path) => Ok(ctx.get_path(path)),

            Expression::Array(items) => items
                .iter()
                .map(|item| Self::evaluate(item, ctx))
                .collect::<EvalResult<Vec<_>>>()
                .map(Value::Array),

            Expression::Binary { left, op, right } => match op {
                Operator::And | Operator::Or => Self::evaluate_logical(left, op, right, ctx),
                op if op.is_comparison() => {
                    let l = Self::evaluate(left, ctx)?;
                    let r = Self::evaluate(right, ctx)?;
                    execute_compare(&l, op, &r).map(Value::Bool)
                }
                op => {
                    let l = Self::evaluate(left, ctx)?;
                    let r = Self::evaluate(right, ctx)?;
                    execute_binary_op(&l, op, &r)
                }
            },

            Expression::Unary { op, operand } => {
                let value = Self::evaluate(operand, ctx)?;
                execute_unary_op(&value, op)
            }

            Expression::FunctionCall { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| Self::evaluate(arg, ctx))
                    .collect::<EvalResult<Vec<_>>>()?;
                call_function(name, &args)
            }
        }
    }

    /// Render a parsed template
    pub fn render(template: &Template, ctx: &ParameterContext) -> EvalResult<String> {
        let mut out = String::new();
        for segment in &template.segments {
            match segment {
                TemplateSegment::Text(text) => out.push_str(text),
                TemplateSegment::Hole(expr) => {
                    let value = Self::evaluate(expr, ctx)?;
                    out.push_str(&value.to_string());
                }
            }
        }
        Ok(out)
    }

    fn evaluate_logical(
        left: &Expression,
        op: &Operator,
        right: &Expression,
        ctx: &ParameterContext,
    ) -> EvalResult<Value> {
        let l = Self::truthiness(&Self::evaluate(left, ctx)?, op)?;
        match (op, l) {
            (Operator::And, false) => Ok(Value::Bool(false)),
            (Operator::Or, true) => Ok(Value::Bool(true)),
            _ => {
                let r = Self::truthiness(&Self::evaluate(right, ctx)?, op)?;
                Ok(Value::Bool(r))
            }
        }
    }

    /// Null counts as false; any other non-boolean operand is an error
    fn truthiness(value: &Value, op: &Operator) -> EvalResult<bool> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Null => Ok(false),
            other => Err(EvalError::TypeError(format!(
                "{} expects boolean operands, got {}",
                op,
                other.type_name()
            ))),
        }
    }
}
