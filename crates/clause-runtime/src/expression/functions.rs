//! Built-in expression functions

use crate::expression::error::{EvalError, EvalResult};
use clause_core::Value;

/// Call a built-in function with already-evaluated arguments
pub(crate) fn call_function(name: &str, args: &[Value]) -> EvalResult<Value> {
    match name {
        "is_empty" => Ok(Value::Bool(single(name, args)?.is_blank())),
        "is_not_empty" => Ok(Value::Bool(!single(name, args)?.is_blank())),
        "len" => match single(name, args)? {
            Value::Null => Ok(Value::Number(0.0)),
            Value::String(s) => Ok(Value::Number(s.chars().count() as f64)),
            Value::Array(items) => Ok(Value::Number(items.len() as f64)),
            Value::Object(map) => Ok(Value::Number(map.len() as f64)),
            other => Err(type_error(name, other)),
        },
        "lower" => map_string(name, args, |s| s.to_lowercase()),
        "upper" => map_string(name, args, |s| s.to_uppercase()),
        "trim" => map_string(name, args, |s| s.trim().to_string()),
        _ => Err(EvalError::UnknownFunction(name.to_string())),
    }
}

fn single<'a>(name: &str, args: &'a [Value]) -> EvalResult<&'a Value> {
    match args {
        [arg] => Ok(arg),
        _ => Err(EvalError::FunctionArity {
            name: name.to_string(),
            expected: 1,
            actual: args.len(),
        }),
    }
}

fn map_string(name: &str, args: &[Value], f: impl Fn(&str) -> String) -> EvalResult<Value> {
    match single(name, args)? {
        Value::Null => Ok(Value::Null),
        Value::String(s) => Ok(Value::String(f(s))),
        other => Err(type_error(name, other)),
    }
}

fn type_error(name: &str, value: &Value) -> EvalError {
    EvalError::TypeError(format!(
        "{}() does not accept a {} argument",
        name,
        value.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert_eq!(
            call_function("is_empty", &[Value::from("  ")]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            call_function("is_not_empty", &[Value::Null]).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_string_functions() {
        assert_eq!(
            call_function("lower", &[Value::from("ABC")]).unwrap(),
            Value::from("abc")
        );
        assert_eq!(
            call_function("trim", &[Value::from(" x ")]).unwrap(),
            Value::from("x")
        );
        assert_eq!(
            call_function("len", &[Value::from("héllo")]).unwrap(),
            Value::Number(5.0)
        );
        assert!(call_function("upper", &[Value::Number(1.0)]).is_err());
    }

    #[test]
    fn test_unknown_and_arity() {
        assert!(matches!(
            call_function("regex", &[]),
            Err(EvalError::UnknownFunction(_))
        ));
        assert!(matches!(
            call_function("len", &[]),
            Err(EvalError::FunctionArity { expected: 1, actual: 0, .. })
        ));
    }
}
