use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// QuerySpec
///
/// Data-only form of `QuerySettings`, suitable for storing named queries.
/// Predicate closures and comparators have no data form; a spec can only
/// describe declarative filters and field orders.
///
/// where   → filter expression, e.g. `"age > ?"`
/// operand → value bound to the expression's placeholder
/// select  → projection field
/// order   → order field, descending when `desc` is set
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuerySpec {
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operand: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub desc: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl QuerySpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style filter expression without an operand.
    #[must_use]
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filter = Some(expression.into());
        self.operand = None;
        self
    }

    /// Builder-style filter expression with a bound operand.
    #[must_use]
    pub fn filter_with(mut self, expression: impl Into<String>, operand: impl Into<Value>) -> Self {
        self.filter = Some(expression.into());
        self.operand = Some(operand.into());
        self
    }

    #[must_use]
    pub fn select(mut self, field: impl Into<String>) -> Self {
        self.select = Some(field.into());
        self
    }

    #[must_use]
    pub fn order(mut self, field: impl Into<String>, descending: bool) -> Self {
        self.order = Some(field.into());
        self.desc = descending;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}
