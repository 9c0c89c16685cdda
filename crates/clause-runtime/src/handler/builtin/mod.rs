//! Built-in operator handlers

mod comparison;
mod like;
mod membership;
mod null;
mod range;

pub use comparison::ComparisonHandler;
pub use like::{escape_like, LikeHandler, LikeOrLikeHandler};
pub use membership::InHandler;
pub use null::NullHandler;
pub use range::BetweenHandler;

use super::OperatorHandler;
use clause_core::Value;
use std::sync::Arc;

/// One instance of every built-in handler
pub fn all() -> Vec<Arc<dyn OperatorHandler>> {
    vec![
        Arc::new(ComparisonHandler::equals()),
        Arc::new(ComparisonHandler::not_equals()),
        Arc::new(ComparisonHandler::greater_than()),
        Arc::new(ComparisonHandler::greater_than_equal()),
        Arc::new(ComparisonHandler::less_than()),
        Arc::new(ComparisonHandler::less_than_equal()),
        Arc::new(LikeHandler::like()),
        Arc::new(LikeHandler::not_like()),
        Arc::new(LikeHandler::starts_with()),
        Arc::new(LikeHandler::ends_with()),
        Arc::new(LikeOrLikeHandler),
        Arc::new(BetweenHandler),
        Arc::new(InHandler::is_in()),
        Arc::new(InHandler::not_in()),
        Arc::new(NullHandler::is_null()),
        Arc::new(NullHandler::is_not_null()),
    ]
}

/// Short description of a value's shape for error messages
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("array of {} element(s)", items.len()),
        other => other.type_name().to_string(),
    }
}
