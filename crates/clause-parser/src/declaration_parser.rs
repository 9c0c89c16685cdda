//! Declaration parser
//!
//! Parses YAML or JSON declaration documents into `FieldDeclaration`s.
//!
//! Two document shapes are accepted:
//!
//! ```yaml
//! declarations:
//!   - field: age
//!     operator: LESS_THAN
//!     value: 30
//! ```
//!
//! or a bare sequence of declarations. Operator kinds are normalized to
//! upper case, and match expressions, value expressions and templates are
//! syntax-checked up front so a malformed document fails at load time.

use crate::error::{ParseError, Result};
use crate::expression_parser::ExpressionParser;
use crate::template_parser::TemplateParser;
use clause_core::{FieldDeclaration, ValueSource};
use serde_yaml::Value as YamlValue;

/// Declaration document parser
pub struct DeclarationParser;

impl DeclarationParser {
    /// Parse declarations from a YAML string
    pub fn parse_yaml(yaml_str: &str) -> Result<Vec<FieldDeclaration>> {
        let yaml: YamlValue = serde_yaml::from_str(yaml_str)?;
        Self::parse_from_yaml(yaml)
    }

    /// Parse declarations from a JSON string
    pub fn parse_json(json_str: &str) -> Result<Vec<FieldDeclaration>> {
        let json: serde_json::Value = serde_json::from_str(json_str)?;
        let list = match json {
            serde_json::Value::Object(mut obj) => {
                obj.remove("declarations")
                    .ok_or_else(|| ParseError::MissingField {
                        field: "declarations".to_string(),
                    })?
            }
            other => other,
        };
        let declarations: Vec<FieldDeclaration> = serde_json::from_value(list)?;
        Self::finish(declarations)
    }

    /// Parse declarations from an already-loaded YAML value
    pub fn parse_from_yaml(yaml: YamlValue) -> Result<Vec<FieldDeclaration>> {
        let list = match yaml {
            YamlValue::Mapping(mut map) => {
                map.remove("declarations")
                    .ok_or_else(|| ParseError::MissingField {
                        field: "declarations".to_string(),
                    })?
            }
            // An empty document holds no declarations
            YamlValue::Null => return Ok(Vec::new()),
            other => other,
        };
        let declarations: Vec<FieldDeclaration> = serde_yaml::from_value(list)?;
        Self::finish(declarations)
    }

    fn finish(declarations: Vec<FieldDeclaration>) -> Result<Vec<FieldDeclaration>> {
        let declarations = declarations
            .into_iter()
            .enumerate()
            .map(|(index, decl)| Self::validate(index, decl))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Parsed {} field declarations", declarations.len());
        Ok(declarations)
    }

    /// Validate one declaration and normalize its operator kind
    fn validate(index: usize, mut decl: FieldDeclaration) -> Result<FieldDeclaration> {
        let location = |name: &str| format!("declarations[{index}].{name}");

        if decl.field.trim().is_empty() {
            return Err(ParseError::InvalidValue {
                field: location("field"),
                message: "field name must not be empty".to_string(),
            });
        }

        let operator = decl.operator.trim().to_ascii_uppercase();
        if operator.is_empty() {
            return Err(ParseError::InvalidValue {
                field: location("operator"),
                message: "operator must not be empty".to_string(),
            });
        }
        decl.operator = operator;

        if !decl.match_expr.trim().is_empty() {
            ExpressionParser::parse(&decl.match_expr).map_err(|e| ParseError::InvalidValue {
                field: location("match"),
                message: e.to_string(),
            })?;
        }

        match &decl.value {
            ValueSource::Expression(expr) => {
                ExpressionParser::parse(expr).map_err(|e| ParseError::InvalidValue {
                    field: location("value.expr"),
                    message: e.to_string(),
                })?;
            }
            ValueSource::Template(template) => {
                TemplateParser::parse(template).map_err(|e| ParseError::InvalidValue {
                    field: location("value.template"),
                    message: e.to_string(),
                })?;
            }
            ValueSource::Literal(_) | ValueSource::Param(_) => {}
        }

        Ok(decl)
    }
}
