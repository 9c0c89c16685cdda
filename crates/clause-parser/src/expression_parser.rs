//! Expression parser
//!
//! Parses match expressions and value expressions into Expression AST nodes.
//!
//! Supported syntax:
//! - Field access: `age`, `user.profile.age`
//! - Literals: `42`, `3.14`, `"string"`, `'string'`, `true`, `false`, `null`, `[1, 2]`
//! - Binary operators: `||`, `&&`, `==`, `!=`, `<`, `<=`, `>`, `>=`, `+`, `-`, `*`, `/`, `%`
//! - Keyword operators: `contains`, `starts_with`, `ends_with`, `in`, `not_in`
//! - Unary operators: `!`, `-`
//! - Function calls: `is_empty(name)`, `lower(user.email)`
//! - Parentheses for grouping: `(a + b) * c`
//!
//! Operators inside string literals, parentheses and brackets are never split on.

use crate::error::{ParseError, Result};
use clause_core::ast::{Expression, Operator, UnaryOperator};
use clause_core::Value;

const KEYWORD_OPERATORS: &[&str] = &["contains", "starts_with", "ends_with", "not_in", "in"];

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ParseError::InvalidExpression("Empty expression".to_string()));
        }

        Self::parse_expression(input)
    }

    /// Parse a complete expression (handles binary operators with precedence)
    fn parse_expression(input: &str) -> Result<Expression> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::InvalidExpression("Missing operand".to_string()));
        }

        // Lowest precedence first: the last split found becomes the root
        if let Some((left, op, right)) = Self::split_by_operator(input, &["||"]) {
            return Self::binary(left, op, right);
        }

        if let Some((left, op, right)) = Self::split_by_operator(input, &["&&"]) {
            return Self::binary(left, op, right);
        }

        if let Some((left, op, right)) = Self::split_by_keyword_operator(input, KEYWORD_OPERATORS)
        {
            return Self::binary(left, op, right);
        }

        if let Some((left, op, right)) =
            Self::split_by_operator(input, &["==", "!=", "<=", ">=", "<", ">"])
        {
            return Self::binary(left, op, right);
        }

        if let Some((left, op, right)) = Self::split_by_operator(input, &["+", "-"]) {
            return Self::binary(left, op, right);
        }

        if let Some((left, op, right)) = Self::split_by_operator(input, &["*", "/", "%"]) {
            return Self::binary(left, op, right);
        }

        Self::parse_primary(input)
    }

    fn binary(left: &str, op: &str, right: &str) -> Result<Expression> {
        let op = Self::parse_operator(op)?;
        Ok(Expression::binary(
            Self::parse_expression(left)?,
            op,
            Self::parse_expression(right)?,
        ))
    }

    /// Parse a primary expression
    fn parse_primary(input: &str) -> Result<Expression> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::InvalidExpression("Missing operand".to_string()));
        }

        // Unary operators
        if let Some(rest) = input.strip_prefix('!') {
            return Ok(Expression::unary(
                UnaryOperator::Not,
                Self::parse_primary(rest)?,
            ));
        }

        if let Some(rest) = input.strip_prefix('-') {
            // Only digit-led literals; `-nan` and `-inf` stay identifiers
            if rest.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                if let Ok(num) = input.parse::<f64>() {
                    return Ok(Expression::literal(Value::Number(num)));
                }
            }
            return Ok(Expression::unary(
                UnaryOperator::Negate,
                Self::parse_primary(rest)?,
            ));
        }

        // Parentheses
        if Self::is_wrapped(input, b'(', b')') {
            return Self::parse_expression(&input[1..input.len() - 1]);
        }

        // Array literal
        if Self::is_wrapped(input, b'[', b']') {
            let items = Self::split_top_level_commas(&input[1..input.len() - 1])
                .into_iter()
                .map(Self::parse_expression)
                .collect::<Result<Vec<_>>>()?;
            return Ok(Expression::Array(items));
        }

        // String literals
        if let Some(s) = Self::string_literal(input) {
            return Ok(Expression::literal(Value::String(s.to_string())));
        }

        match input {
            "true" => return Ok(Expression::literal(Value::Bool(true))),
            "false" => return Ok(Expression::literal(Value::Bool(false))),
            "null" => return Ok(Expression::literal(Value::Null)),
            _ => {}
        }

        // Number literals
        if input.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return input
                .parse::<f64>()
                .map(|num| Expression::literal(Value::Number(num)))
                .map_err(|_| ParseError::InvalidExpression(format!("Invalid number: {}", input)));
        }

        // Function calls
        if let Some(paren_pos) = input.find('(') {
            let func_name = input[..paren_pos].trim();
            if Self::is_identifier(func_name) && Self::is_wrapped(&input[paren_pos..], b'(', b')')
            {
                let args_str = &input[paren_pos + 1..input.len() - 1];
                let args = Self::parse_function_args(args_str)?;
                return Ok(Expression::function_call(func_name.to_string(), args));
            }
        }

        // Field access, dotted or single identifier
        let parts: Vec<&str> = input.split('.').map(str::trim).collect();
        if parts.iter().all(|part| Self::is_identifier(part)) {
            return Ok(Expression::field_access(parts));
        }

        Err(ParseError::InvalidExpression(format!("Cannot parse: {}", input)))
    }

    /// Split input by binary operator (respecting quotes, parentheses and brackets)
    fn split_by_operator<'a>(
        input: &'a str,
        operators: &[&str],
    ) -> Option<(&'a str, &'a str, &'a str)> {
        Self::split_top_level(input, |bytes, i| {
            operators.iter().find_map(|op| {
                let end = i + op.len();
                let matched = end <= bytes.len()
                    && &bytes[i..end] == op.as_bytes()
                    && Self::is_binary_position(bytes, i, op);
                matched.then_some(op.len())
            })
        })
    }

    /// Split input by keyword operator (respecting word boundaries)
    fn split_by_keyword_operator<'a>(
        input: &'a str,
        operators: &[&str],
    ) -> Option<(&'a str, &'a str, &'a str)> {
        Self::split_top_level(input, |bytes, i| {
            operators.iter().find_map(|op| {
                let end = i + op.len();
                let matched = i > 0
                    && end < bytes.len()
                    && &bytes[i..end] == op.as_bytes()
                    && bytes[i - 1].is_ascii_whitespace()
                    && bytes[end].is_ascii_whitespace();
                matched.then_some(op.len())
            })
        })
    }

    /// Scan right to left for the first top-level operator accepted by `matcher`
    ///
    /// Scanning from the right makes the split left-associative.
    fn split_top_level<'a>(
        input: &'a str,
        matcher: impl Fn(&[u8], usize) -> Option<usize>,
    ) -> Option<(&'a str, &'a str, &'a str)> {
        let bytes = input.as_bytes();
        let mut depth = 0i32;
        let mut quote: Option<u8> = None;

        for i in (0..bytes.len()).rev() {
            let c = bytes[i];

            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                continue;
            }

            match c {
                b'"' | b'\'' => {
                    quote = Some(c);
                    continue;
                }
                b')' | b']' => {
                    depth += 1;
                    continue;
                }
                b'(' | b'[' => {
                    depth -= 1;
                    continue;
                }
                _ => {}
            }

            if depth != 0 {
                continue;
            }

            // Operators are ASCII, so `i` and `i + len` are char boundaries
            if let Some(len) = matcher(bytes, i) {
                return Some((
                    input[..i].trim(),
                    &input[i..i + len],
                    input[i + len..].trim(),
                ));
            }
        }

        None
    }

    /// Reject matches that are really part of a longer or unary operator
    fn is_binary_position(bytes: &[u8], i: usize, op: &str) -> bool {
        let end = i + op.len();
        let prev = if i > 0 { Some(bytes[i - 1]) } else { None };
        let next = bytes.get(end).copied();

        match op {
            "==" | "!=" | "<=" | ">=" => {
                !matches!(prev, Some(b'=' | b'!' | b'<' | b'>')) && next != Some(b'=')
            }
            "<" | ">" => next != Some(b'=') && !matches!(prev, Some(b'<' | b'>')),
            "+" | "-" => {
                Self::ends_with_operand(&bytes[..i]) && !Self::is_exponent_sign(&bytes[..i])
            }
            _ => true,
        }
    }

    /// Whether the text before a `+`/`-` ends with an operand, making the sign binary
    fn ends_with_operand(prefix: &[u8]) -> bool {
        prefix
            .iter()
            .rev()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|&b| {
                b.is_ascii_alphanumeric() || matches!(b, b'_' | b')' | b']' | b'"' | b'\'' | b'.')
            })
    }

    /// Whether a `+`/`-` after `prefix` is the sign of an exponent, as in `1e-5`
    fn is_exponent_sign(prefix: &[u8]) -> bool {
        let Some((&last, mantissa)) = prefix.split_last() else {
            return false;
        };
        if !matches!(last, b'e' | b'E') {
            return false;
        }

        let start = mantissa
            .iter()
            .rposition(|b| !(b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.')))
            .map_or(0, |p| p + 1);
        let token = &mantissa[start..];
        token.iter().any(u8::is_ascii_digit)
            && token.iter().all(|b| b.is_ascii_digit() || *b == b'.')
    }

    /// True if `input` starts with `open` whose matching `close` is the last byte
    fn is_wrapped(input: &str, open: u8, close: u8) -> bool {
        let bytes = input.as_bytes();
        if bytes.len() < 2 || bytes[0] != open || bytes[bytes.len() - 1] != close {
            return false;
        }

        let mut depth = 0i32;
        let mut quote: Option<u8> = None;
        for (i, &c) in bytes.iter().enumerate() {
            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                b'"' | b'\'' => quote = Some(c),
                c if c == open => depth += 1,
                c if c == close => {
                    depth -= 1;
                    if depth == 0 {
                        return i == bytes.len() - 1;
                    }
                }
                _ => {}
            }
        }

        false
    }

    /// Unquote a single- or double-quoted literal
    fn string_literal(input: &str) -> Option<&str> {
        let bytes = input.as_bytes();
        if bytes.len() < 2 {
            return None;
        }
        let quote = bytes[0];
        if !matches!(quote, b'"' | b'\'') || bytes[bytes.len() - 1] != quote {
            return None;
        }
        let inner = &input[1..input.len() - 1];
        if inner.as_bytes().contains(&quote) {
            return None;
        }
        Some(inner)
    }

    fn is_identifier(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_alphanumeric() || c == '_')
    }

    /// Split on commas that are outside quotes, parentheses and brackets
    fn split_top_level_commas(input: &str) -> Vec<&str> {
        if input.trim().is_empty() {
            return Vec::new();
        }

        let bytes = input.as_bytes();
        let mut parts = Vec::new();
        let mut depth = 0i32;
        let mut quote: Option<u8> = None;
        let mut start = 0;

        for (i, &c) in bytes.iter().enumerate() {
            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                b'"' | b'\'' => quote = Some(c),
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth -= 1,
                b',' if depth == 0 => {
                    parts.push(input[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            }
        }
        parts.push(input[start..].trim());

        parts
    }

    /// Parse function arguments
    fn parse_function_args(args_str: &str) -> Result<Vec<Expression>> {
        Self::split_top_level_commas(args_str)
            .into_iter()
            .map(Self::parse_expression)
            .collect()
    }

    fn parse_operator(op: &str) -> Result<Operator> {
        Operator::from_symbol(op).ok_or_else(|| ParseError::InvalidOperator(op.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(path: &str) -> Expression {
        Expression::field_access(path.split('.'))
    }

    fn num(n: f64) -> Expression {
        Expression::literal(Value::Number(n))
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(ExpressionParser::parse("42").unwrap(), num(42.0));
        assert_eq!(ExpressionParser::parse("-3.5").unwrap(), num(-3.5));
        assert_eq!(
            ExpressionParser::parse(r#""hello world""#).unwrap(),
            Expression::literal(Value::String("hello world".to_string()))
        );
        assert_eq!(
            ExpressionParser::parse("'single'").unwrap(),
            Expression::literal(Value::String("single".to_string()))
        );
        assert_eq!(
            ExpressionParser::parse("true").unwrap(),
            Expression::literal(Value::Bool(true))
        );
        assert_eq!(
            ExpressionParser::parse("null").unwrap(),
            Expression::literal(Value::Null)
        );
    }

    #[test]
    fn test_parse_field_access() {
        assert_eq!(ExpressionParser::parse("age").unwrap(), field("age"));
        assert_eq!(
            ExpressionParser::parse("user.profile.age").unwrap(),
            field("user.profile.age")
        );
    }

    #[test]
    fn test_parse_comparison() {
        assert_eq!(
            ExpressionParser::parse("age > 18").unwrap(),
            Expression::binary(field("age"), Operator::Gt, num(18.0))
        );
        assert_eq!(
            ExpressionParser::parse("age<=18").unwrap(),
            Expression::binary(field("age"), Operator::Le, num(18.0))
        );
        assert_eq!(
            ExpressionParser::parse("a != b").unwrap(),
            Expression::binary(field("a"), Operator::Ne, field("b"))
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        // a || b && c  =>  a || (b && c)
        let expr = ExpressionParser::parse("a || b && c").unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                field("a"),
                Operator::Or,
                Expression::binary(field("b"), Operator::And, field("c")),
            )
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        let expr = ExpressionParser::parse("a - b - c").unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                Expression::binary(field("a"), Operator::Sub, field("b")),
                Operator::Sub,
                field("c"),
            )
        );
    }

    #[test]
    fn test_unary_minus_after_operator() {
        let expr = ExpressionParser::parse("a * -1").unwrap();
        assert_eq!(expr, Expression::binary(field("a"), Operator::Mul, num(-1.0)));

        let expr = ExpressionParser::parse("x - -1").unwrap();
        assert_eq!(expr, Expression::binary(field("x"), Operator::Sub, num(-1.0)));
    }

    #[test]
    fn test_exponent_literals() {
        assert_eq!(ExpressionParser::parse("1e-5").unwrap(), num(1e-5));
        assert_eq!(ExpressionParser::parse("2.5E+3").unwrap(), num(2500.0));
        assert_eq!(ExpressionParser::parse("-1e-5").unwrap(), num(-1e-5));

        let expr = ExpressionParser::parse("x - 1e-5").unwrap();
        assert_eq!(expr, Expression::binary(field("x"), Operator::Sub, num(1e-5)));

        // An identifier ending in `e` is still an operand
        let expr = ExpressionParser::parse("size-1").unwrap();
        assert_eq!(expr, Expression::binary(field("size"), Operator::Sub, num(1.0)));
        let expr = ExpressionParser::parse("x2e-1").unwrap();
        assert_eq!(expr, Expression::binary(field("x2e"), Operator::Sub, num(1.0)));
    }

    #[test]
    fn test_nan_and_inf_are_not_literals() {
        assert_eq!(
            ExpressionParser::parse("-nan").unwrap(),
            Expression::unary(UnaryOperator::Negate, field("nan"))
        );
        assert_eq!(
            ExpressionParser::parse("-inf").unwrap(),
            Expression::unary(UnaryOperator::Negate, field("inf"))
        );
    }

    #[test]
    fn test_operators_inside_strings_are_ignored() {
        let expr = ExpressionParser::parse(r#"name == "a && b > c""#).unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                field("name"),
                Operator::Eq,
                Expression::literal(Value::String("a && b > c".to_string())),
            )
        );
    }

    #[test]
    fn test_parse_keyword_operators() {
        let expr = ExpressionParser::parse(r#"status in ["a", "b"]"#).unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                field("status"),
                Operator::In,
                Expression::Array(vec![
                    Expression::literal(Value::from("a")),
                    Expression::literal(Value::from("b")),
                ]),
            )
        );

        let expr = ExpressionParser::parse(r#"email ends_with "@example.com""#).unwrap();
        assert!(matches!(
            expr,
            Expression::Binary {
                op: Operator::EndsWith,
                ..
            }
        ));

        // `in` inside an identifier is not a keyword
        let expr = ExpressionParser::parse("min_age > 1").unwrap();
        assert!(matches!(expr, Expression::Binary { op: Operator::Gt, .. }));
    }

    #[test]
    fn test_parse_function_call() {
        let expr = ExpressionParser::parse(r#"is_empty(name) || lower(city) == "x""#).unwrap();
        match expr {
            Expression::Binary { left, op, .. } => {
                assert_eq!(op, Operator::Or);
                assert_eq!(
                    *left,
                    Expression::function_call("is_empty".to_string(), vec![field("name")])
                );
            }
            other => panic!("Expected binary, got {other:?}"),
        }

        let expr = ExpressionParser::parse("len([1, 2], x)").unwrap();
        if let Expression::FunctionCall { name, args } = expr {
            assert_eq!(name, "len");
            assert_eq!(args.len(), 2);
        } else {
            panic!("Expected function call");
        }
    }

    #[test]
    fn test_parse_with_parentheses() {
        let expr = ExpressionParser::parse("(a + b) * c").unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                Expression::binary(field("a"), Operator::Add, field("b")),
                Operator::Mul,
                field("c"),
            )
        );

        let expr = ExpressionParser::parse("!(a && b)").unwrap();
        assert!(matches!(
            expr,
            Expression::Unary {
                op: UnaryOperator::Not,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_expression() {
        assert!(ExpressionParser::parse("").is_err());
        assert!(ExpressionParser::parse("   ").is_err());
        assert!(ExpressionParser::parse("@#$").is_err());
        assert!(ExpressionParser::parse("age >").is_err());
        assert!(ExpressionParser::parse("a = b").is_err());
        assert!(ExpressionParser::parse("(a > 1").is_err());
        assert!(ExpressionParser::parse("\"").is_err());
    }
}
