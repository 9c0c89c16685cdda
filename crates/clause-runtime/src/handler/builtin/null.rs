//! IS_NULL and IS_NOT_NULL

use crate::error::Result;
use crate::handler::{BuildContext, MetadataKind, ModeSupport, OperatorHandler};
use crate::predicate::Predicate;
use clause_core::{Metadata, Value};

/// Null test on the column; the declaration's value is ignored
#[derive(Debug, Clone)]
pub struct NullHandler {
    kind: &'static str,
    negated: bool,
}

impl NullHandler {
    pub fn is_null() -> Self {
        Self {
            kind: "IS_NULL",
            negated: false,
        }
    }

    pub fn is_not_null() -> Self {
        Self {
            kind: "IS_NOT_NULL",
            negated: true,
        }
    }
}

impl OperatorHandler for NullHandler {
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
        _value: &Value,
        metadata: Option<&Metadata>,
    ) -> Result<Option<Predicate>> {
        let predicate = Predicate::is_null(ctx.column(field, metadata)?);
        Ok(Some(if self.negated {
            predicate.negate()
        } else {
            predicate
        }))
    }
}
