//! IN and NOT_IN

use super::describe;
use crate::error::{ComposeError, Result};
use crate::handler::{BuildContext, MetadataKind, ModeSupport, OperatorHandler};
use crate::predicate::Predicate;
use clause_core::{Metadata, Value};

/// `column IN (values)`; a scalar is promoted to a one-element list
#[derive(Debug, Clone)]
pub struct InHandler {
    kind: &'static str,
    negated: bool,
}

impl InHandler {
    pub fn is_in() -> Self {
        Self {
            kind: "IN",
            negated: false,
        }
    }

    pub fn not_in() -> Self {
        Self {
            kind: "NOT_IN",
            negated: true,
        }
    }
}

impl OperatorHandler for InHandler {
    fn kind(&self) -> &str {
        self.kind
    }

    fn and_annotation(&self) -> ModeSupport {
        ModeSupport::Metadata(MetadataKind::Column)
    }

    fn and_not_annotation(&self) -> ModeSupport {
        if self.negated {
            ModeSupport::Unsupported
        } else {
            self.and_annotation()
        }
    }

    fn or_not_annotation(&self) -> ModeSupport {
        self.and_not_annotation()
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

        let values = match value {
            Value::Array(items) => items.clone(),
            Value::Null => Vec::new(),
            scalar => vec![scalar.clone()],
        };
        if values.is_empty() {
            return Ok(None);
        }
        if let Some(bad) = values.iter().find(|v| !v.is_scalar()) {
            return Err(ComposeError::invalid_value(self.kind, field, describe(bad)));
        }

        let predicate = Predicate::in_list(ctx.column(field, metadata)?, values);
        Ok(Some(if self.negated {
            predicate.negate()
        } else {
            predicate
        }))
    }
}
