//! FilterEngine - composes loaded declarations into condition trees

use crate::builder::FilterEngineBuilder;
use crate::error::Result;
use clause_core::FieldDeclaration;
use clause_runtime::{ConditionComposer, ConditionTree, ParameterContext};

/// Loaded declarations plus the composer that turns them into trees
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    declarations: Vec<FieldDeclaration>,
    composer: ConditionComposer,
}

impl FilterEngine {
    pub fn builder() -> FilterEngineBuilder {
        FilterEngineBuilder::new()
    }

    pub(crate) fn new(declarations: Vec<FieldDeclaration>, composer: ConditionComposer) -> Self {
        Self {
            declarations,
            composer,
        }
    }

    /// Compose the loaded declarations against `ctx`
    pub fn compose(&self, ctx: &ParameterContext) -> Result<ConditionTree> {
        self.compose_with(&self.declarations, ctx)
    }

    /// Compose ad-hoc declarations with this engine's handlers and settings
    pub fn compose_with(
        &self,
        declarations: &[FieldDeclaration],
        ctx: &ParameterContext,
    ) -> Result<ConditionTree> {
        Ok(self.composer.compose(declarations, ctx)?)
    }

    /// Compose the loaded declarations against a JSON object context
    pub fn compose_json(&self, context: serde_json::Value) -> Result<ConditionTree> {
        let ctx = ParameterContext::from_json(context)?;
        self.compose(&ctx)
    }

    pub fn declarations(&self) -> &[FieldDeclaration] {
        &self.declarations
    }

    pub fn composer(&self) -> &ConditionComposer {
        &self.composer
    }
}
