//! Clause Parser - string and document parsers for the Clause condition composer
//!
//! This crate turns match expressions, `@{...}` templates and YAML/JSON
//! declaration documents into the AST and declaration types of `clause-core`.

pub mod declaration_parser;
pub mod error;
pub mod expression_parser;
pub mod template_parser;

// Re-export main parser types
pub use declaration_parser::DeclarationParser;
pub use error::{ParseError, Result};
pub use expression_parser::ExpressionParser;
pub use template_parser::TemplateParser;
