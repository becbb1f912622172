use crate::{
    error::QueryError,
    filter::{FilterSpec, RecordPredicate},
    record::Record,
    registry::{Condition, ConditionRegistry},
    value::Value,
};

/// Conventional third token when the operand is supplied separately.
///
/// It only carries meaning alongside a bound operand; without one it is an
/// ordinary literal and becomes `Value::Text("?")`.
pub const PLACEHOLDER: &str = "?";

///
/// ParsedExpression
///
/// `"<field> <operator> <literal-or-?>"` split into its parts with the
/// operand resolved.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedExpression {
    pub field: String,
    pub operator: String,
    pub operand: Value,
}

/// Split a declarative filter expression on whitespace.
///
/// Without a separate operand the expression needs exactly three tokens and
/// the third becomes a `Value::Text` operand verbatim. With an operand only
/// the field and operator are read; any later tokens are ignored.
pub fn parse_expression(
    expression: &str,
    operand: Option<&Value>,
) -> Result<ParsedExpression, QueryError> {
    let tokens: Vec<&str> = expression.split_whitespace().collect();

    let (field, operator, operand) = match (tokens.as_slice(), operand) {
        ([field, operator, literal], None) => {
            (*field, *operator, Value::Text((*literal).to_string()))
        }
        ([field, operator, ..], Some(operand)) => (*field, *operator, operand.clone()),
        (tokens, Some(_)) => {
            return Err(QueryError::malformed_filter(
                expression,
                format!("expected at least 2 tokens, found {}", tokens.len()),
            ));
        }
        (tokens, None) => {
            return Err(QueryError::malformed_filter(
                expression,
                format!("expected 3 tokens, found {}", tokens.len()),
            ));
        }
    };

    Ok(ParsedExpression {
        field: field.to_string(),
        operator: operator.to_string(),
        operand,
    })
}

///
/// CompiledFilter
///
/// A `FilterSpec` resolved against a registry, ready to test records.
///

#[derive(Debug)]
pub(crate) enum CompiledFilter {
    Predicate(RecordPredicate),
    Condition {
        field: String,
        condition: Condition,
        operand: Value,
    },
}

impl CompiledFilter {
    /// Resolve a filter spec. Fails on malformed expressions and on operator
    /// tokens the registry does not know.
    pub(crate) fn compile(
        spec: &FilterSpec,
        registry: &ConditionRegistry,
    ) -> Result<Self, QueryError> {
        match spec {
            FilterSpec::Predicate(predicate) => Ok(Self::Predicate(predicate.clone())),
            FilterSpec::Expression {
                expression,
                operand,
            } => {
                let parsed = parse_expression(expression, operand.as_ref())?;
                let condition = registry
                    .get(&parsed.operator)
                    .ok_or_else(|| QueryError::unknown_operator(&parsed.operator))?;

                Ok(Self::Condition {
                    field: parsed.field,
                    condition,
                    operand: parsed.operand,
                })
            }
        }
    }

    pub(crate) fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Predicate(predicate) => predicate.test(record),
            Self::Condition {
                field,
                condition,
                operand,
            } => condition.test(record.get(field), operand),
        }
    }
}
