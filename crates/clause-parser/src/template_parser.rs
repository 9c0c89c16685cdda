//! Template parser
//!
//! Splits a template such as `%@{user.name}%` into literal text and
//! `@{expression}` holes. Hole bodies are parsed with [`ExpressionParser`].

use crate::error::{ParseError, Result};
use crate::expression_parser::ExpressionParser;
use clause_core::ast::{Template, TemplateSegment};

/// Template parser
pub struct TemplateParser;

impl TemplateParser {
    /// Parse a template string
    pub fn parse(input: &str) -> Result<Template> {
        let bytes = input.as_bytes();
        let mut segments = Vec::new();
        let mut text_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'@' || bytes.get(i + 1) != Some(&b'{') {
                i += 1;
                continue;
            }

            if text_start < i {
                segments.push(TemplateSegment::Text(input[text_start..i].to_string()));
            }

            let body_start = i + 2;
            let body_end = Self::find_closing_brace(bytes, body_start).ok_or_else(|| {
                ParseError::InvalidTemplate {
                    offset: i,
                    message: "unterminated '@{' hole".to_string(),
                }
            })?;

            let body = input[body_start..body_end].trim();
            if body.is_empty() {
                return Err(ParseError::InvalidTemplate {
                    offset: i,
                    message: "empty hole".to_string(),
                });
            }

            let expr = ExpressionParser::parse(body).map_err(|e| ParseError::InvalidTemplate {
                offset: i,
                message: e.to_string(),
            })?;
            segments.push(TemplateSegment::Hole(expr));

            i = body_end + 1;
            text_start = i;
        }

        if text_start < bytes.len() {
            segments.push(TemplateSegment::Text(input[text_start..].to_string()));
        }

        Ok(Template::new(segments))
    }

    /// Position of the `}` closing a hole body, skipping quoted text and nested braces
    fn find_closing_brace(bytes: &[u8], start: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        for (offset, &c) in bytes[start..].iter().enumerate() {
            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                b'"' | b'\'' => quote = Some(c),
                b'{' => depth += 1,
                b'}' if depth == 0 => return Some(start + offset),
                b'}' => depth -= 1,
                _ => {}
            }
        }

        None
    }
}
