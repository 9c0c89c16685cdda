//! Template AST
//!
//! A template is literal text interleaved with `@{expression}` holes. The
//! parser crate builds it; the runtime renders it against a parameter context.

use super::expression::Expression;
use serde::{Deserialize, Serialize};

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal text copied verbatim
    Text(String),
    /// Expression whose rendered value replaces the hole
    Hole(Expression),
}

/// Parsed template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    pub fn new(segments: Vec<TemplateSegment>) -> Self {
        Self { segments }
    }
}
