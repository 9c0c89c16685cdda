//! EQUALS, NOT_EQUALS and the ordering operators

use super::describe;
use crate::error::{ComposeError, Result};
use crate::handler::{BuildContext, MetadataKind, ModeSupport, OperatorHandler};
use crate::predicate::{CompareOp, Predicate};
use clause_core::{Metadata, Value};

/// `column <op> value`
///
/// Ordering operators require a number or string; equality accepts any
/// scalar, and a null compared for equality becomes an IS NULL test.
#[derive(Debug, Clone)]
pub struct ComparisonHandler {
    kind: &'static str,
    op: CompareOp,
}

impl ComparisonHandler {
    pub fn equals() -> Self {
        Self {
            kind: "EQUALS",
            op: CompareOp::Eq,
        }
    }

    pub fn not_equals() -> Self {
        Self {
            kind: "NOT_EQUALS",
            op: CompareOp::Ne,
        }
    }

    pub fn greater_than() -> Self {
        Self {
            kind: "GREATER_THAN",
            op: CompareOp::Gt,
        }
    }

    pub fn greater_than_equal() -> Self {
        Self {
            kind: "GREATER_THAN_EQUAL",
            op: CompareOp::Ge,
        }
    }

    pub fn less_than() -> Self {
        Self {
            kind: "LESS_THAN",
            op: CompareOp::Lt,
        }
    }

    pub fn less_than_equal() -> Self {
        Self {
            kind: "LESS_THAN_EQUAL",
            op: CompareOp::Le,
        }
    }

    fn is_ordering(&self) -> bool {
        !matches!(self.op, CompareOp::Eq | CompareOp::Ne)
    }
}

impl OperatorHandler for ComparisonHandler {
    fn kind(&self) -> &str {
        self.kind
    }

    fn and_annotation(&self) -> ModeSupport {
        ModeSupport::Metadata(MetadataKind::Column)
    }

    fn build_predicate(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
        metadata: Option<&Metadata>,
    ) -> Result<Option<Predicate>> {
        if ctx.skips(value) {
            return Ok(None);
        }

        if self.is_ordering() {
            if !value.is_ordinable() {
                return Err(ComposeError::invalid_value(self.kind, field, describe(value)));
            }
        } else if !value.is_scalar() && !value.is_null() {
            return Err(ComposeError::invalid_value(self.kind, field, describe(value)));
        }

        let column = ctx.column(field, metadata)?;
        let predicate = match (self.op, value) {
            (CompareOp::Eq, Value::Null) => Predicate::is_null(column),
            (CompareOp::Ne, Value::Null) => Predicate::is_null(column).negate(),
            (op, value) => Predicate::compare(column, op, value.clone()),
        };
        Ok(Some(predicate))
    }
}
