//! Match gate
//!
//! Decides whether a declaration takes part in the composed tree.

use crate::context::ParameterContext;
use crate::expression::{ExpressionError, ExpressionEvaluator};
use clause_core::FieldDeclaration;

/// Stateless per-declaration inclusion check
pub struct ConditionGate;

impl ConditionGate {
    /// True when the declaration's match expression is blank or evaluates to `true`
    pub fn should_include(
        declaration: &FieldDeclaration,
        ctx: &ParameterContext,
    ) -> Result<bool, ExpressionError> {
        ExpressionEvaluator::is_match(&declaration.match_expr, ctx)
    }
}
