//! Predicate IR
//!
//! Backend-neutral condition fragments produced by operator handlers and
//! folded into a [`ConditionTree`]. A storage backend compiles the tree into
//! its own query language; [`Predicate::matches`] evaluates it in memory.

mod matcher;
mod tree;

pub use matcher::like_match;
pub use tree::{ConditionFragment, ConditionTree};

use clause_core::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One condition over record columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// `column <op> value`
    Compare {
        column: String,
        op: CompareOp,
        value: Value,
    },
    /// SQL-style LIKE; `%` and `_` are wildcards unless preceded by `escape`
    Like {
        column: String,
        pattern: String,
        escape: char,
    },
    /// Inclusive range
    Between {
        column: String,
        low: Value,
        high: Value,
    },
    In {
        column: String,
        values: Vec<Value>,
    },
    IsNull {
        column: String,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn compare(column: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Predicate::Compare {
            column: column.into(),
            op,
            value,
        }
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<String>, escape: char) -> Self {
        Predicate::Like {
            column: column.into(),
            pattern: pattern.into(),
            escape,
        }
    }

    pub fn between(column: impl Into<String>, low: Value, high: Value) -> Self {
        Predicate::Between {
            column: column.into(),
            low,
            high,
        }
    }

    pub fn in_list(column: impl Into<String>, values: Vec<Value>) -> Self {
        Predicate::In {
            column: column.into(),
            values,
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Predicate::IsNull {
            column: column.into(),
        }
    }

    /// Wrap in `Not`
    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }
}

/// Quote strings, print everything else as is
struct Literal<'a>(&'a Value);

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            other => write!(f, "{other}"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Predicate], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " {sep} ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { column, op, value } => {
                write!(f, "{column} {op} {}", Literal(value))
            }
            Predicate::Like {
                column,
                pattern,
                escape,
            } => write!(
                f,
                "{column} LIKE {} ESCAPE {}",
                Literal(&Value::String(pattern.clone())),
                Literal(&Value::String(escape.to_string()))
            ),
            Predicate::Between { column, low, high } => {
                write!(f, "{column} BETWEEN {} AND {}", Literal(low), Literal(high))
            }
            Predicate::In { column, values } => {
                write!(f, "{column} IN (")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", Literal(value))?;
                }
                write!(f, ")")
            }
            Predicate::IsNull { column } => write!(f, "{column} IS NULL"),
            Predicate::And(items) => write_joined(f, items, "AND"),
            Predicate::Or(items) => write_joined(f, items, "OR"),
            Predicate::Not(inner) => match inner.as_ref() {
                Predicate::And(_) | Predicate::Or(_) => write!(f, "NOT {inner}"),
                _ => write!(f, "NOT ({inner})"),
            },
        }
    }
}
