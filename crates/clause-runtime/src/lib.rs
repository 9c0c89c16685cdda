//! Clause Runtime - condition composition engine
//!
//! This crate evaluates match expressions against a parameter context,
//! builds condition fragments through pluggable operator handlers and folds
//! them into a backend-neutral condition tree.

pub mod composer;
pub mod config;
pub mod context;
pub mod error;
pub mod expression;
pub mod gate;
pub mod handler;
pub mod predicate;

// Re-export main types
pub use composer::{resolve_value, ConditionComposer};
pub use config::ComposerConfig;
pub use context::ParameterContext;
pub use error::{ComposeError, Result};
pub use expression::{EvalError, ExpressionError, ExpressionEvaluator};
pub use gate::ConditionGate;
pub use handler::{
    BuildContext, HandlerRegistry, MetadataKind, ModeSupport, OperatorHandler, RecordShape,
};
pub use predicate::{CompareOp, ConditionFragment, ConditionTree, Predicate};
