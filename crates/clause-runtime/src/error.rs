//! Composition error types

use crate::expression::ExpressionError;
use clause_core::CombinationMode;
use thiserror::Error;

/// Error raised while composing a condition tree
///
/// Any error aborts the whole composition. Errors raised for one declaration
/// are wrapped in [`ComposeError::Field`] so the field name is always known.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Strict expression evaluation failed (match gate, value expression or template)
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    /// No handler registered for the operator kind
    #[error("Unknown operator: {operator_kind}")]
    UnknownOperator { operator_kind: String },

    /// Fan-out operator received a different number of values than target fields
    #[error("Field arity mismatch: expected {expected} value(s), got {actual}")]
    FieldArity { expected: usize, actual: usize },

    /// Value shape unsuitable for the operator
    #[error("Operator {operator_kind} cannot use a {actual} value for field '{field}'")]
    InvalidValueType {
        operator_kind: String,
        field: String,
        actual: String,
    },

    /// Handler declared the combination mode unsupported
    #[error("Operator {operator_kind} does not support mode {mode}")]
    UnsupportedMode {
        operator_kind: String,
        mode: CombinationMode,
    },

    /// Record shape has no such column
    #[error("Unknown column '{column}' on '{entity}'")]
    UnknownColumn { entity: String, column: String },

    /// Error raised while processing one declaration
    #[error("Cannot build condition for field '{field}'")]
    Field {
        field: String,
        source: Box<ComposeError>,
    },
}

impl ComposeError {
    pub fn invalid_value(
        operator_kind: impl Into<String>,
        field: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ComposeError::InvalidValueType {
            operator_kind: operator_kind.into(),
            field: field.into(),
            actual: actual.into(),
        }
    }

    /// Attach the declaration's field name, unless already attached
    pub fn in_field(self, field: &str) -> Self {
        match self {
            ComposeError::Field { .. } => self,
            other => ComposeError::Field {
                field: field.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Field name of the declaration that failed, if attached
    pub fn field(&self) -> Option<&str> {
        match self {
            ComposeError::Field { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Innermost error with the field wrapper removed
    pub fn root_cause(&self) -> &ComposeError {
        match self {
            ComposeError::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for composition
pub type Result<T> = std::result::Result<T, ComposeError>;
