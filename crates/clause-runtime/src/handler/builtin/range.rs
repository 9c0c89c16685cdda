//! BETWEEN

use super::describe;
use crate::error::{ComposeError, Result};
use crate::handler::{BuildContext, MetadataKind, ModeSupport, OperatorHandler};
use crate::predicate::{CompareOp, Predicate};
use clause_core::{Metadata, Value};

/// Inclusive range over `[low, high]`; a null bound leaves that side open
#[derive(Debug, Clone, Copy, Default)]
pub struct BetweenHandler;

impl BetweenHandler {
    const KIND: &'static str = "BETWEEN";
}

impl OperatorHandler for BetweenHandler {
    fn kind(&self) -> &str {
        Self::KIND
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

        let invalid = || ComposeError::invalid_value(Self::KIND, field, describe(value));

        let (low, high) = match value.as_array() {
            Some([low, high]) => (low, high),
            _ => return Err(invalid()),
        };

        let bound_ok = |bound: &Value| bound.is_null() || bound.is_ordinable();
        if !bound_ok(low) || !bound_ok(high) {
            return Err(invalid());
        }
        if !low.is_null() && !high.is_null() && low.compare(high).is_none() {
            return Err(invalid());
        }

        let column = ctx.column(field, metadata)?;
        Ok(match (low.is_null(), high.is_null()) {
            (true, true) => None,
            (false, true) => Some(Predicate::compare(column, CompareOp::Ge, low.clone())),
            (true, false) => Some(Predicate::compare(column, CompareOp::Le, high.clone())),
            (false, false) => Some(Predicate::between(column, low.clone(), high.clone())),
        })
    }
}
