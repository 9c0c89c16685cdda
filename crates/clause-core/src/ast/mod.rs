//! Abstract Syntax Tree definitions for match expressions and templates

pub mod expression;
pub mod operator;
pub mod template;

pub use expression::{Expression, UnaryOperator};
pub use operator::Operator;
pub use template::{Template, TemplateSegment};
