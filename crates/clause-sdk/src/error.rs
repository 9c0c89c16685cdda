//! SDK error types

use std::path::PathBuf;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] clause_parser::ParseError),

    /// Declaration file failed to parse
    #[error("Invalid declaration file {}: {source}", path.display())]
    InvalidDeclarationFile {
        path: PathBuf,
        source: clause_parser::ParseError,
    },

    /// Composition error
    #[error("Compose error: {0}")]
    ComposeError(#[from] clause_runtime::ComposeError),

    /// Parameter context is not an object
    #[error("Invalid parameter context: {0}")]
    InvalidContext(#[from] clause_core::CoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
