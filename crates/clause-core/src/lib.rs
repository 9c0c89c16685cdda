//! Clause Core - Core types and definitions for the Clause condition composer
//!
//! This crate provides the fundamental types used across the Clause workspace:
//! - Value types for runtime data
//! - Expression and template AST definitions
//! - Field declarations and combination modes
//! - Error types

pub mod ast;
pub mod declaration;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use declaration::{CombinationMode, FieldDeclaration, Join, Metadata, ValueSource};
pub use error::CoreError;
pub use types::Value;
