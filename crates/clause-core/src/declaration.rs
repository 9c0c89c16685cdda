//! Field declarations
//!
//! A `FieldDeclaration` describes one candidate condition: which field it
//! targets, which operator builds it, how it joins the conditions before it,
//! where its value comes from and which match expression gates it.

use crate::error::CoreError;
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a fragment joins the accumulated condition tree
///
/// The NOT variants negate the fragment itself, never the join. Documents
/// may spell a mode in any case, with `-` or `_` separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum CombinationMode {
    #[default]
    And,
    AndNot,
    Or,
    OrNot,
}

/// Logical connective used when folding a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    And,
    Or,
}

impl CombinationMode {
    pub const ALL: [CombinationMode; 4] = [
        CombinationMode::And,
        CombinationMode::AndNot,
        CombinationMode::Or,
        CombinationMode::OrNot,
    ];

    pub fn join(&self) -> Join {
        match self {
            CombinationMode::And | CombinationMode::AndNot => Join::And,
            CombinationMode::Or | CombinationMode::OrNot => Join::Or,
        }
    }

    pub fn is_negated(&self) -> bool {
        matches!(self, CombinationMode::AndNot | CombinationMode::OrNot)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CombinationMode::And => "AND",
            CombinationMode::AndNot => "AND_NOT",
            CombinationMode::Or => "OR",
            CombinationMode::OrNot => "OR_NOT",
        }
    }
}

impl fmt::Display for CombinationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombinationMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "AND" => Ok(CombinationMode::And),
            "AND_NOT" => Ok(CombinationMode::AndNot),
            "OR" => Ok(CombinationMode::Or),
            "OR_NOT" => Ok(CombinationMode::OrNot),
            _ => Err(CoreError::InvalidValue(format!(
                "unknown combination mode '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for CombinationMode {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Where a declaration's value comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ValueSourceRepr", into = "ValueSourceRepr")]
pub enum ValueSource {
    /// Fixed value
    Literal(Value),
    /// Parameter path, looked up leniently; a missing parameter reads as null
    Param(String),
    /// Expression evaluated strictly against the parameter context
    Expression(String),
    /// Template rendered to a string against the parameter context
    Template(String),
}

impl ValueSource {
    pub fn literal(value: impl Into<Value>) -> Self {
        ValueSource::Literal(value.into())
    }

    pub fn param(path: impl Into<String>) -> Self {
        ValueSource::Param(path.into())
    }

    pub fn expression(expr: impl Into<String>) -> Self {
        ValueSource::Expression(expr.into())
    }

    pub fn template(template: impl Into<String>) -> Self {
        ValueSource::Template(template.into())
    }
}

impl Default for ValueSource {
    fn default() -> Self {
        ValueSource::Literal(Value::Null)
    }
}

macro_rules! literal_value_source {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ValueSource {
                fn from(value: $ty) -> Self {
                    ValueSource::Literal(value.into())
                }
            }
        )*
    };
}

literal_value_source!(Value, bool, f64, i32, i64, &str, String, Vec<Value>);

// Wire shape: `{ param: .. }`, `{ expr: .. }`, `{ template: .. }` or a bare value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ValueSourceRepr {
    Param { param: String },
    Expression { expr: String },
    Template { template: String },
    Literal(Value),
}

impl From<ValueSourceRepr> for ValueSource {
    fn from(repr: ValueSourceRepr) -> Self {
        match repr {
            ValueSourceRepr::Param { param } => ValueSource::Param(param),
            ValueSourceRepr::Expression { expr } => ValueSource::Expression(expr),
            ValueSourceRepr::Template { template } => ValueSource::Template(template),
            ValueSourceRepr::Literal(value) => ValueSource::Literal(value),
        }
    }
}

impl From<ValueSource> for ValueSourceRepr {
    fn from(source: ValueSource) -> Self {
        match source {
            ValueSource::Param(param) => ValueSourceRepr::Param { param },
            ValueSource::Expression(expr) => ValueSourceRepr::Expression { expr },
            ValueSource::Template(template) => ValueSourceRepr::Template { template },
            ValueSource::Literal(value) => ValueSourceRepr::Literal(value),
        }
    }
}

/// Operator-specific metadata attached to a declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Metadata {
    /// Column the fragment targets instead of the declaration's field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Target columns of a fan-out operator
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl Metadata {
    pub fn column(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            fields: Vec::new(),
        }
    }

    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: None,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.column.is_none() && self.fields.is_empty()
    }
}

/// One candidate condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Field (column) the condition targets
    pub field: String,

    /// Operator kind, resolved against the handler registry
    pub operator: String,

    /// How the fragment joins the preceding conditions
    #[serde(default)]
    pub mode: CombinationMode,

    /// Source of the compared value
    #[serde(default)]
    pub value: ValueSource,

    /// Gate expression; blank means always include
    #[serde(rename = "match", default, skip_serializing_if = "String::is_empty")]
    pub match_expr: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl FieldDeclaration {
    /// Create an AND declaration with no gate and no metadata
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<ValueSource>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            mode: CombinationMode::And,
            value: value.into(),
            match_expr: String::new(),
            metadata: None,
        }
    }

    pub fn with_mode(mut self, mode: CombinationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_match(mut self, match_expr: impl Into<String>) -> Self {
        self.match_expr = match_expr.into();
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Metadata, treating an all-empty block as absent
    pub fn effective_metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref().filter(|m| !m.is_empty())
    }
}
