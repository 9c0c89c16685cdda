//! In-memory predicate evaluation
//!
//! Lets a condition tree be checked against a record without a storage
//! backend. Missing columns read as null; any comparison with null is false.

use super::{CompareOp, Predicate};
use clause_core::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

impl Predicate {
    /// Evaluate against one record
    pub fn matches(&self, record: &HashMap<String, Value>) -> bool {
        let column_value = |column: &str| record.get(column).unwrap_or(&Value::Null);

        match self {
            Predicate::Compare { column, op, value } => {
                compare_values(column_value(column), *op, value)
            }
            Predicate::Like {
                column,
                pattern,
                escape,
            } => match column_value(column) {
                Value::String(text) => like_match(text, pattern, *escape),
                Value::Number(_) | Value::Bool(_) => {
                    like_match(&column_value(column).to_string(), pattern, *escape)
                }
                _ => false,
            },
            Predicate::Between { column, low, high } => {
                let value = column_value(column);
                compare_values(value, CompareOp::Ge, low) && compare_values(value, CompareOp::Le, high)
            }
            Predicate::In { column, values } => {
                let value = column_value(column);
                !value.is_null() && values.iter().any(|v| v == value)
            }
            Predicate::IsNull { column } => column_value(column).is_null(),
            Predicate::And(items) => items.iter().all(|p| p.matches(record)),
            Predicate::Or(items) => items.iter().any(|p| p.matches(record)),
            Predicate::Not(inner) => !inner.matches(record),
        }
    }
}

fn compare_values(left: &Value, op: CompareOp, right: &Value) -> bool {
    if left.is_null() || right.is_null() {
        return false;
    }
    match op {
        CompareOp::Eq => left == right,
        CompareOp::Ne => left != right,
        _ => match left.compare(right) {
            Some(ordering) => match op {
                CompareOp::Lt => ordering == Ordering::Less,
                CompareOp::Le => ordering != Ordering::Greater,
                CompareOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            },
            None => false,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LikeToken {
    Literal(char),
    AnyOne,
    AnyMany,
}

fn tokenize(pattern: &str, escape: char) -> Vec<LikeToken> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let token = if c == escape {
            // A trailing escape char matches itself
            LikeToken::Literal(chars.next().unwrap_or(c))
        } else if c == '%' {
            LikeToken::AnyMany
        } else if c == '_' {
            LikeToken::AnyOne
        } else {
            LikeToken::Literal(c)
        };
        tokens.push(token);
    }
    tokens
}

/// Match `text` against a LIKE pattern
///
/// `%` matches any run of characters, `_` exactly one; a character preceded
/// by `escape` matches itself.
pub fn like_match(text: &str, pattern: &str, escape: char) -> bool {
    let tokens = tokenize(pattern, escape);
    let text: Vec<char> = text.chars().collect();

    let (mut t, mut p) = (0, 0);
    // Token index after the last `%`, and the text index it is currently anchored at
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match tokens.get(p) {
            Some(LikeToken::AnyMany) => {
                p += 1;
                backtrack = Some((p, t));
                continue;
            }
            Some(LikeToken::AnyOne) => {
                t += 1;
                p += 1;
                continue;
            }
            Some(LikeToken::Literal(c)) if *c == text[t] => {
                t += 1;
                p += 1;
                continue;
            }
            _ => {}
        }

        match backtrack {
            Some((after_star, anchor)) => {
                p = after_star;
                t = anchor + 1;
                backtrack = Some((after_star, anchor + 1));
            }
            None => return false,
        }
    }

    tokens[p..].iter().all(|token| *token == LikeToken::AnyMany)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_like_wildcards() {
        assert!(like_match("hello world", "%world", '\\'));
        assert!(like_match("hello world", "hello%", '\\'));
        assert!(like_match("hello world", "%lo w%", '\\'));
        assert!(like_match("cat", "c_t", '\\'));
        assert!(!like_match("cart", "c_t", '\\'));
        assert!(like_match("", "%", '\\'));
        assert!(!like_match("abc", "", '\\'));
        assert!(like_match("aXbXc", "%X%X%", '\\'));
    }

    #[test]
    fn test_like_escapes() {
        assert!(like_match("100%", "%100\\%%", '\\'));
        assert!(!like_match("1000", "%100\\%%", '\\'));
        assert!(like_match("a_b", "a\\_b", '\\'));
        assert!(!like_match("axb", "a\\_b", '\\'));
        assert!(like_match("50%", "50!%", '!'));
    }

    #[test]
    fn test_compare_and_between() {
        let r = record(&[("age", Value::Number(18.0))]);
        assert!(Predicate::compare("age", CompareOp::Lt, Value::Number(30.0)).matches(&r));
        assert!(!Predicate::compare("age", CompareOp::Gt, Value::Number(18.0)).matches(&r));
        assert!(Predicate::between("age", Value::Number(18.0), Value::Number(20.0)).matches(&r));
        assert!(!Predicate::compare("missing", CompareOp::Ne, Value::Number(1.0)).matches(&r));
        assert!(!Predicate::compare("age", CompareOp::Lt, Value::from("x")).matches(&r));
    }

    #[test]
    fn test_membership_and_null() {
        let r = record(&[("status", Value::from("open")), ("closed_at", Value::Null)]);
        assert!(Predicate::in_list("status", vec![Value::from("open")]).matches(&r));
        assert!(Predicate::is_null("closed_at").matches(&r));
        assert!(Predicate::is_null("missing").matches(&r));
        assert!(Predicate::is_null("status").negate().matches(&r));
    }

    #[test]
    fn test_connectives() {
        let r = record(&[("a", Value::Number(1.0))]);
        let yes = Predicate::compare("a", CompareOp::Eq, Value::Number(1.0));
        let no = Predicate::compare("a", CompareOp::Eq, Value::Number(2.0));

        assert!(Predicate::Or(vec![no.clone(), yes.clone()]).matches(&r));
        assert!(!Predicate::And(vec![no.clone(), yes.clone()]).matches(&r));
        assert!(no.negate().matches(&r));
    }
}
