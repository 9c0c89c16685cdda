//! Operator handler framework
//!
//! An [`OperatorHandler`] turns `(field, value, metadata)` into a
//! [`Predicate`] for one operator kind. The eight mode-specific build methods
//! (AND / AND_NOT / OR / OR_NOT, each with and without metadata) are provided
//! on top of a single [`OperatorHandler::build_predicate`]; the four
//! annotation accessors declare which modes and metadata a handler supports.
//!
//! New operators are added by implementing the trait and registering the
//! handler in a [`HandlerRegistry`]; the dispatcher never changes.

pub mod builtin;
pub mod dispatch;
mod registry;

pub use registry::HandlerRegistry;

use crate::config::ComposerConfig;
use crate::error::{ComposeError, Result};
use crate::predicate::{ConditionFragment, Predicate};
use clause_core::{CombinationMode, Metadata, Value};
use serde::{Deserialize, Serialize};

/// Metadata a handler reads for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKind {
    /// `metadata.column` re-targets the fragment
    Column,
    /// `metadata.fields` lists fan-out target columns
    Fields,
}

/// What a handler declares for one combination mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSupport {
    /// Mode rejected; composing a declaration with it is an error
    Unsupported,
    /// Supported, metadata is ignored
    Plain,
    /// Supported, metadata of this kind is read when present
    Metadata(MetadataKind),
}

impl ModeSupport {
    pub fn is_supported(&self) -> bool {
        !matches!(self, ModeSupport::Unsupported)
    }

    pub fn metadata_kind(&self) -> Option<MetadataKind> {
        match self {
            ModeSupport::Metadata(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Entity whose columns the fragments target
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordShape {
    #[serde(default)]
    pub entity: String,

    /// Known columns; `None` accepts any column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

impl RecordShape {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            columns: None,
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns
            .as_ref()
            .map_or(true, |columns| columns.iter().any(|c| c == column))
    }
}

/// Everything a handler may consult besides the declaration itself
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub config: &'a ComposerConfig,
    pub shape: &'a RecordShape,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a ComposerConfig, shape: &'a RecordShape) -> Self {
        Self { config, shape }
    }

    /// Target column: `metadata.column` when set, else the field name
    pub fn column(&self, field: &str, metadata: Option<&Metadata>) -> Result<String> {
        let column = metadata
            .and_then(|m| m.column.as_deref())
            .unwrap_or(field);
        self.check_column(column)
    }

    /// Validate a column name against the record shape
    pub fn check_column(&self, column: &str) -> Result<String> {
        if self.shape.has_column(column) {
            Ok(column.to_string())
        } else {
            Err(ComposeError::UnknownColumn {
                entity: self.shape.entity.clone(),
                column: column.to_string(),
            })
        }
    }

    /// Whether a blank value should make the handler skip the field
    pub fn skips(&self, value: &Value) -> bool {
        self.config.skip_blank_values && value.is_blank()
    }
}

/// Builds predicates for one operator kind
pub trait OperatorHandler: Send + Sync {
    /// Operator kind this handler is registered under, e.g. `LESS_THAN`
    fn kind(&self) -> &str;

    fn and_annotation(&self) -> ModeSupport;

    fn and_not_annotation(&self) -> ModeSupport {
        self.and_annotation()
    }

    fn or_annotation(&self) -> ModeSupport {
        self.and_annotation()
    }

    fn or_not_annotation(&self) -> ModeSupport {
        self.and_annotation()
    }

    /// Build the un-negated predicate, or `None` to skip the field
    ///
    /// `metadata` is `None` for the plain build variants.
    fn build_predicate(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
        metadata: Option<&Metadata>,
    ) -> Result<Option<Predicate>>;

    fn build_and_predicate(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
        metadata: &Metadata,
    ) -> Result<Option<ConditionFragment>> {
        tagged(self, CombinationMode::And, ctx, field, value, Some(metadata))
    }

    fn build_and_predicate_plain(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
    ) -> Result<Option<ConditionFragment>> {
        tagged(self, CombinationMode::And, ctx, field, value, None)
    }

    fn build_and_not_predicate(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
        metadata: &Metadata,
    ) -> Result<Option<ConditionFragment>> {
        tagged(self, CombinationMode::AndNot, ctx, field, value, Some(metadata))
    }

    fn build_and_not_predicate_plain(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
    ) -> Result<Option<ConditionFragment>> {
        tagged(self, CombinationMode::AndNot, ctx, field, value, None)
    }

    fn build_or_predicate(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
        metadata: &Metadata,
    ) -> Result<Option<ConditionFragment>> {
        tagged(self, CombinationMode::Or, ctx, field, value, Some(metadata))
    }

    fn build_or_predicate_plain(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
    ) -> Result<Option<ConditionFragment>> {
        tagged(self, CombinationMode::Or, ctx, field, value, None)
    }

    fn build_or_not_predicate(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
        metadata: &Metadata,
    ) -> Result<Option<ConditionFragment>> {
        tagged(self, CombinationMode::OrNot, ctx, field, value, Some(metadata))
    }

    fn build_or_not_predicate_plain(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
    ) -> Result<Option<ConditionFragment>> {
        tagged(self, CombinationMode::OrNot, ctx, field, value, None)
    }
}

fn tagged<H: OperatorHandler + ?Sized>(
    handler: &H,
    mode: CombinationMode,
    ctx: &BuildContext<'_>,
    field: &str,
    value: &Value,
    metadata: Option<&Metadata>,
) -> Result<Option<ConditionFragment>> {
    Ok(handler
        .build_predicate(ctx, field, value, metadata)?
        .map(|predicate| ConditionFragment::new(predicate, mode)))
}
