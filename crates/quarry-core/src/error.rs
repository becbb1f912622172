use std::fmt;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Configuration errors raised by `Query::execute`.
/// Builder calls never validate; every check happens at execution time, and
/// an execution either returns a complete response or one of these.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum QueryError {
    #[error("invalid order spec: {reason}")]
    InvalidOrderSpec { reason: String },

    #[error("malformed filter expression '{expression}': {reason}")]
    MalformedFilterExpression { expression: String, reason: String },

    #[error("unknown operator '{token}'")]
    UnknownOperator { token: String },
}

impl QueryError {
    pub(crate) fn invalid_order(reason: impl Into<String>) -> Self {
        Self::InvalidOrderSpec {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_filter(expression: &str, reason: impl Into<String>) -> Self {
        Self::MalformedFilterExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_operator(token: impl Into<String>) -> Self {
        Self::UnknownOperator {
            token: token.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownOperator { .. } => ErrorClass::Unsupported,
            Self::InvalidOrderSpec { .. } | Self::MalformedFilterExpression { .. } => {
                ErrorClass::InvariantViolation
            }
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::InvalidOrderSpec { .. } => ErrorOrigin::Order,
            Self::MalformedFilterExpression { .. } | Self::UnknownOperator { .. } => {
                ErrorOrigin::Filter
            }
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin(), self.class(), self)
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Unsupported,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Pipeline stage that rejected the configuration.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Filter,
    Order,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Filter => "filter",
            Self::Order => "order",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_operator_is_unsupported_filter_error() {
        let err = QueryError::unknown_operator("~=");

        assert_eq!(err.class(), ErrorClass::Unsupported);
        assert_eq!(err.origin(), ErrorOrigin::Filter);
        assert_eq!(err.to_string(), "unknown operator '~='");
    }

    #[test]
    fn display_with_class_prefixes_origin_and_class() {
        let err = QueryError::invalid_order("field name is empty");

        assert_eq!(
            err.display_with_class(),
            "order:invariant_violation: invalid order spec: field name is empty"
        );
    }

    #[test]
    fn malformed_filter_reports_expression() {
        let err = QueryError::malformed_filter("age >", "expected 3 tokens, found 2");

        assert_eq!(err.class(), ErrorClass::InvariantViolation);
        assert_eq!(
            err.to_string(),
            "malformed filter expression 'age >': expected 3 tokens, found 2"
        );
    }
}
