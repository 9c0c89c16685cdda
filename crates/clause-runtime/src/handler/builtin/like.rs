//! LIKE family and the LIKE_OR_LIKE fan-out operator

use super::describe;
use crate::error::{ComposeError, Result};
use crate::handler::{BuildContext, MetadataKind, ModeSupport, OperatorHandler};
use crate::predicate::Predicate;
use clause_core::{Metadata, Value};

/// Escape LIKE wildcards so `text` matches literally
pub fn escape_like(text: &str, escape: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == escape || c == '%' || c == '_' {
            out.push(escape);
        }
        out.push(c);
    }
    out
}

/// Scalar as LIKE text; numbers and booleans use their display form
fn like_text(kind: &str, field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(_) | Value::Bool(_) => Ok(value.to_string()),
        other => Err(ComposeError::invalid_value(kind, field, describe(other))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Contains,
    Prefix,
    Suffix,
}

/// LIKE, NOT_LIKE, STARTS_WITH and ENDS_WITH
#[derive(Debug, Clone)]
pub struct LikeHandler {
    kind: &'static str,
    anchor: Anchor,
    negated: bool,
}

impl LikeHandler {
    /// `column LIKE '%value%'`
    pub fn like() -> Self {
        Self {
            kind: "LIKE",
            anchor: Anchor::Contains,
            negated: false,
        }
    }

    pub fn not_like() -> Self {
        Self {
            kind: "NOT_LIKE",
            anchor: Anchor::Contains,
            negated: true,
        }
    }

    /// `column LIKE 'value%'`
    pub fn starts_with() -> Self {
        Self {
            kind: "STARTS_WITH",
            anchor: Anchor::Prefix,
            negated: false,
        }
    }

    /// `column LIKE '%value'`
    pub fn ends_with() -> Self {
        Self {
            kind: "ENDS_WITH",
            anchor: Anchor::Suffix,
            negated: false,
        }
    }

    fn pattern(&self, escaped: &str) -> String {
        match self.anchor {
            Anchor::Contains => format!("%{escaped}%"),
            Anchor::Prefix => format!("{escaped}%"),
            Anchor::Suffix => format!("%{escaped}"),
        }
    }

    fn negated_mode_support(&self) -> ModeSupport {
        if self.negated {
            ModeSupport::Unsupported
        } else {
            self.and_annotation()
        }
    }
}

impl OperatorHandler for LikeHandler {
    fn kind(&self) -> &str {
        self.kind
    }

    fn and_annotation(&self) -> ModeSupport {
        ModeSupport::Metadata(MetadataKind::Column)
    }

    fn and_not_annotation(&self) -> ModeSupport {
        self.negated_mode_support()
    }

    fn or_not_annotation(&self) -> ModeSupport {
        self.negated_mode_support()
    }

    fn build_predicate(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
        metadata: Option<&Metadata>,
    ) -> Result<Option<Predicate>> {
        if ctx.skips(value) {
            return Ok(None);
        }

        let text = like_text(self.kind, field, value)?;
        let column = ctx.column(field, metadata)?;
        let escape = ctx.config.like_escape;
        let predicate = Predicate::like(column, self.pattern(&escape_like(&text, escape)), escape);

        Ok(Some(if self.negated {
            predicate.negate()
        } else {
            predicate
        }))
    }
}

/// Fan-out LIKE: `fields[0] LIKE '%v0%' OR fields[1] LIKE '%v1%' ...`
///
/// `metadata.fields` names N columns and the value must be a sequence of
/// exactly N values. N = 0 with an empty sequence builds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LikeOrLikeHandler;

impl LikeOrLikeHandler {
    const KIND: &'static str = "LIKE_OR_LIKE";
}

impl OperatorHandler for LikeOrLikeHandler {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn and_annotation(&self) -> ModeSupport {
        ModeSupport::Metadata(MetadataKind::Fields)
    }

    fn build_predicate(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        value: &Value,
        metadata: Option<&Metadata>,
    ) -> Result<Option<Predicate>> {
        if value.is_null() && ctx.config.skip_blank_values {
            return Ok(None);
        }

        let fields = metadata.map(|m| m.fields.as_slice()).unwrap_or_default();
        let values = value
            .as_array()
            .ok_or_else(|| ComposeError::invalid_value(Self::KIND, field, describe(value)))?;

        if fields.len() != values.len() {
            return Err(ComposeError::FieldArity {
                expected: fields.len(),
                actual: values.len(),
            });
        }

        // Blank items still fan out as `%%`; only an all-blank value is skipped
        if values.iter().all(|item| ctx.skips(item)) {
            return Ok(None);
        }

        let escape = ctx.config.like_escape;
        let mut disjuncts = Vec::with_capacity(fields.len());
        for (column, item) in fields.iter().zip(values) {
            let text = match item {
                Value::Null => String::new(),
                item => like_text(Self::KIND, field, item)?,
            };
            let column = ctx.check_column(column)?;
            disjuncts.push(Predicate::like(
                column,
                format!("%{}%", escape_like(&text, escape)),
                escape,
            ));
        }

        Ok(match disjuncts.len() {
            0 => None,
            1 => disjuncts.pop(),
            _ => Some(Predicate::Or(disjuncts)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComposerConfig;
    use crate::handler::builtin::test_support::{build, build_with};
    use crate::predicate::like_match;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%", '\\'), "100\\%");
        assert_eq!(escape_like("a_b\\c", '\\'), "a\\_b\\\\c");
        assert_eq!(escape_like("50%!", '!'), "50!%!!");
    }

    #[test]
    fn test_like_patterns() {
        let p = build(&LikeHandler::like(), "title", Value::from("rust"), None).unwrap();
        assert_eq!(p, Some(Predicate::like("title", "%rust%", '\\')));

        let p = build(&LikeHandler::starts_with(), "title", Value::from("ru"), None).unwrap();
        assert_eq!(p, Some(Predicate::like("title", "ru%", '\\')));

        let p = build(&LikeHandler::ends_with(), "code", Value::Number(42.0), None).unwrap();
        assert_eq!(p, Some(Predicate::like("code", "%42", '\\')));

        let p = build(&LikeHandler::not_like(), "title", Value::from("x"), None).unwrap();
        assert_eq!(p, Some(Predicate::like("title", "%x%", '\\').negate()));
    }

    #[test]
    fn test_not_like_rejects_negated_modes() {
        let handler = LikeHandler::not_like();
        assert_eq!(handler.and_not_annotation(), ModeSupport::Unsupported);
        assert_eq!(handler.or_not_annotation(), ModeSupport::Unsupported);
        assert!(handler.or_annotation().is_supported());
        assert!(LikeHandler::like().and_not_annotation().is_supported());
    }

    #[test]
    fn test_like_rejects_collections() {
        let err = build(&LikeHandler::like(), "title", Value::from(vec!["a"]), None).unwrap_err();
        assert!(matches!(err, ComposeError::InvalidValueType { .. }));
    }

    #[test]
    fn test_like_or_like_fans_out() {
        let meta = Metadata::fields(["title", "body"]);
        let p = build(
            &LikeOrLikeHandler,
            "keyword",
            Value::from(vec!["a", "b"]),
            Some(&meta),
        )
        .unwrap();

        assert_eq!(
            p,
            Some(Predicate::Or(vec![
                Predicate::like("title", "%a%", '\\'),
                Predicate::like("body", "%b%", '\\'),
            ]))
        );
    }

    #[test]
    fn test_like_or_like_escapes_percent() {
        let meta = Metadata::fields(["name"]);
        let p = build(&LikeOrLikeHandler, "name", Value::from(vec!["100%"]), Some(&meta))
            .unwrap()
            .unwrap();

        match &p {
            Predicate::Like {
                pattern, escape, ..
            } => {
                assert_eq!(pattern, "%100\\%%");
                assert!(like_match("price 100% off", pattern, *escape));
                assert!(!like_match("price 1000 off", pattern, *escape));
            }
            other => panic!("Expected Like, got {other:?}"),
        }
    }

    #[test]
    fn test_like_or_like_arity() {
        for (n, m) in [(2usize, 1usize), (1, 2), (0, 1), (3, 0)] {
            let meta = Metadata::fields((0..n).map(|i| format!("f{i}")));
            let value = Value::Array((0..m).map(|i| Value::from(format!("v{i}"))).collect());
            let err = build(&LikeOrLikeHandler, "kw", value, Some(&meta)).unwrap_err();
            assert!(
                matches!(err, ComposeError::FieldArity { expected, actual } if expected == n && actual == m),
                "n={n} m={m}"
            );
        }

        // Zero fields and zero values builds nothing
        let p = build(&LikeOrLikeHandler, "kw", Value::Array(vec![]), Some(&Metadata::default()))
            .unwrap();
        assert_eq!(p, None);
    }

    #[test]
    fn test_like_or_like_keeps_blank_items() {
        let meta = Metadata::fields(["title", "body"]);
        let p = build(
            &LikeOrLikeHandler,
            "keyword",
            Value::from(vec!["", "x"]),
            Some(&meta),
        )
        .unwrap();

        assert_eq!(
            p,
            Some(Predicate::Or(vec![
                Predicate::like("title", "%%", '\\'),
                Predicate::like("body", "%x%", '\\'),
            ]))
        );

        let p = build(
            &LikeOrLikeHandler,
            "keyword",
            Value::Array(vec![Value::from("x"), Value::Null]),
            Some(&meta),
        )
        .unwrap();
        assert_eq!(
            p,
            Some(Predicate::Or(vec![
                Predicate::like("title", "%x%", '\\'),
                Predicate::like("body", "%%", '\\'),
            ]))
        );
    }

    #[test]
    fn test_like_or_like_all_blank_is_skipped() {
        let meta = Metadata::fields(["title", "body"]);
        let value = Value::Array(vec![Value::from(" "), Value::Null]);
        assert_eq!(
            build(&LikeOrLikeHandler, "keyword", value.clone(), Some(&meta)).unwrap(),
            None
        );

        let keep = ComposerConfig::default().with_skip_blank_values(false);
        let p = build_with(&LikeOrLikeHandler, &keep, "keyword", value, Some(&meta)).unwrap();
        assert_eq!(
            p,
            Some(Predicate::Or(vec![
                Predicate::like("title", "% %", '\\'),
                Predicate::like("body", "%%", '\\'),
            ]))
        );
    }

    #[test]
    fn test_like_or_like_requires_sequence() {
        let meta = Metadata::fields(["title"]);
        let err = build(&LikeOrLikeHandler, "kw", Value::from("a"), Some(&meta)).unwrap_err();
        assert!(matches!(err, ComposeError::InvalidValueType { .. }));

        assert_eq!(
            build(&LikeOrLikeHandler, "kw", Value::Null, Some(&meta)).unwrap(),
            None
        );
        let keep = ComposerConfig::default().with_skip_blank_values(false);
        assert!(build_with(&LikeOrLikeHandler, &keep, "kw", Value::Null, Some(&meta)).is_err());
    }
}
