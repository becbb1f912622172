//! Filter specifications and their resolution against a condition registry.

mod parse;


use crate::{record::Record, value::Value};
use std::{fmt, sync::Arc};

// re-exports
pub(crate) use parse::CompiledFilter;
pub use parse::{PLACEHOLDER, ParsedExpression, parse_expression};

///
/// RecordPredicate
///
/// Whole-record predicate; a record is kept iff it returns true.
///

#[derive(Clone)]
pub struct RecordPredicate(Arc<dyn Fn(&Record) -> bool + Send + Sync>);

impl RecordPredicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn test(&self, record: &Record) -> bool {
        (self.0)(record)
    }
}

impl fmt::Debug for RecordPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RecordPredicate(..)")
    }
}

///
/// FilterSpec
///
/// Stored form of a `where` condition, tagged at configuration time.
///
/// Predicate   → called once per record with the whole record.
/// Expression  → `"<field> <operator> <literal-or-?>"`, resolved against the
///               condition registry when the query executes. `operand`
///               supplies the value for a `?` placeholder and wins over any
///               literal third token.
///

#[derive(Clone, Debug)]
pub enum FilterSpec {
    Predicate(RecordPredicate),
    Expression {
        expression: String,
        operand: Option<Value>,
    },
}

impl FilterSpec {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(RecordPredicate::new(f))
    }

    /// Expression whose third token is used verbatim as a text operand.
    pub fn expr(expression: impl Into<String>) -> Self {
        Self::Expression {
            expression: expression.into(),
            operand: None,
        }
    }

    /// Expression with a separately supplied operand.
    pub fn expr_with(expression: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::Expression {
            expression: expression.into(),
            operand: Some(operand.into()),
        }
    }

    /// Bind (or rebind) the operand of an expression.
    /// Predicates are returned unchanged.
    #[must_use]
    pub fn bind(self, value: impl Into<Value>) -> Self {
        match self {
            Self::Expression { expression, .. } => Self::Expression {
                expression,
                operand: Some(value.into()),
            },
            predicate @ Self::Predicate(_) => predicate,
        }
    }

    #[must_use]
    pub const fn is_predicate(&self) -> bool {
        matches!(self, Self::Predicate(_))
    }
}

impl From<&str> for FilterSpec {
    fn from(expression: &str) -> Self {
        Self::expr(expression)
    }
}

impl From<String> for FilterSpec {
    fn from(expression: String) -> Self {
        Self::expr(expression)
    }
}

impl From<RecordPredicate> for FilterSpec {
    fn from(predicate: RecordPredicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl<E: Into<String>, V: Into<Value>> From<(E, V)> for FilterSpec {
    fn from((expression, operand): (E, V)) -> Self {
        Self::expr_with(expression, operand)
    }
}
