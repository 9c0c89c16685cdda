//! Field Lookup Utilities
//!
//! Helpers for navigating nested values using dot-notation paths.

use clause_core::Value;
use std::collections::HashMap;

/// Get nested value from a map following a path
///
/// Returns `Value::Null` if any part of the path is not found, or if an
/// intermediate value is not an object.
pub(super) fn get_nested_value(data: &HashMap<String, Value>, path: &[String]) -> Value {
    let Some((first, rest)) = path.split_first() else {
        return Value::Null;
    };

    let mut current = match data.get(first) {
        Some(v) => v,
        None => {
            tracing::debug!("Parameter not found: {}, returning Null", first);
            return Value::Null;
        }
    };

    for key in rest {
        current = match current {
            Value::Object(map) => match map.get(key) {
                Some(v) => v,
                None => {
                    tracing::debug!("Field not found: {}, returning Null", key);
                    return Value::Null;
                }
            },
            _ => {
                tracing::debug!(
                    "Cannot access field '{}' on a {}, returning Null",
                    key,
                    current.type_name()
                );
                return Value::Null;
            }
        };
    }

    current.clone()
}
