//! Clause SDK
//!
//! High-level API for loading field declarations and composing them into
//! condition trees.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;

// Re-export main types
pub use builder::FilterEngineBuilder;
pub use config::EngineConfig;
pub use engine::FilterEngine;
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use clause_core::{CombinationMode, FieldDeclaration, Metadata, Value, ValueSource};
pub use clause_runtime::{
    ComposeError, ComposerConfig, ConditionTree, HandlerRegistry, OperatorHandler,
    ParameterContext, Predicate, RecordShape,
};
