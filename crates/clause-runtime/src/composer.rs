//! Condition composer
//!
//! Drives one composition: gate each declaration, resolve its value, build a
//! fragment through the registered handler and fold it into the tree.

use crate::config::ComposerConfig;
use crate::context::ParameterContext;
use crate::error::{ComposeError, Result};
use crate::expression::ExpressionEvaluator;
use crate::gate::ConditionGate;
use crate::handler::{dispatch, BuildContext, HandlerRegistry, RecordShape};
use crate::predicate::{ConditionFragment, ConditionTree};
use clause_core::{FieldDeclaration, Value, ValueSource};
use std::sync::Arc;

/// Composes field declarations into a condition tree
///
/// Holds only read-only state; `compose` can run concurrently.
#[derive(Debug, Clone)]
pub struct ConditionComposer {
    registry: Arc<HandlerRegistry>,
    config: ComposerConfig,
    shape: RecordShape,
}

impl Default for ConditionComposer {
    fn default() -> Self {
        Self::new(HandlerRegistry::global())
    }
}

impl ConditionComposer {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self {
            registry,
            config: ComposerConfig::default(),
            shape: RecordShape::default(),
        }
    }

    pub fn with_config(mut self, config: ComposerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_record_shape(mut self, shape: RecordShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn record_shape(&self) -> &RecordShape {
        &self.shape
    }

    /// Compose declarations, in order, against `ctx`
    ///
    /// Any error aborts the composition; it is returned wrapped with the
    /// failing declaration's field name.
    pub fn compose(
        &self,
        declarations: &[FieldDeclaration],
        ctx: &ParameterContext,
    ) -> Result<ConditionTree> {
        let build_ctx = BuildContext::new(&self.config, &self.shape);
        let mut tree = ConditionTree::new();

        for decl in declarations {
            let fragment = self
                .compose_one(decl, ctx, &build_ctx)
                .map_err(|e| e.in_field(&decl.field))?;

            if let Some(fragment) = fragment {
                tracing::debug!(
                    "Folding {} fragment for field '{}': {}",
                    fragment.mode,
                    decl.field,
                    fragment.predicate
                );
                tree.fold(fragment);
            }
        }

        tracing::debug!("Composed {} declarations into {}", declarations.len(), tree);
        Ok(tree)
    }

    fn compose_one(
        &self,
        decl: &FieldDeclaration,
        ctx: &ParameterContext,
        build_ctx: &BuildContext<'_>,
    ) -> Result<Option<ConditionFragment>> {
        if !ConditionGate::should_include(decl, ctx)? {
            tracing::debug!(
                "Field '{}' gated out by match '{}'",
                decl.field,
                decl.match_expr
            );
            return Ok(None);
        }

        let handler =
            self.registry
                .get(&decl.operator)
                .ok_or_else(|| ComposeError::UnknownOperator {
                    operator_kind: decl.operator.clone(),
                })?;

        let value = resolve_value(&decl.value, ctx)?;

        let fragment = dispatch::build_fragment(
            handler.as_ref(),
            build_ctx,
            &decl.field,
            &value,
            decl.mode,
            decl.effective_metadata(),
        )?;

        if fragment.is_none() {
            tracing::debug!(
                "Operator {} skipped field '{}' for value {:?}",
                handler.kind(),
                decl.field,
                value
            );
        }
        Ok(fragment)
    }
}

/// Resolve a declaration's value source against the context
pub fn resolve_value(source: &ValueSource, ctx: &ParameterContext) -> Result<Value> {
    Ok(match source {
        ValueSource::Literal(value) => value.clone(),
        ValueSource::Param(path) => {
            ExpressionEvaluator::eval_soft(path, ctx).unwrap_or(Value::Null)
        }
        ValueSource::Expression(expr) => ExpressionEvaluator::eval_strict(expr, ctx)?,
        ValueSource::Template(template) => {
            Value::String(ExpressionEvaluator::eval_template(template, ctx)?)
        }
    })
}
