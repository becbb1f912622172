use crate::{record::Record, value::Value};
use serde::Serialize;

///
/// Response
/// Materialized query result, newly allocated on every execution.
///
/// Records → no projection was set; whole records in pipeline order.
/// Values  → a projection was set; one field value per surviving record.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Records(Vec<Record>),
    Values(Vec<Value>),
}

impl Response {
    //
    // Cardinality
    //

    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Records(rows) => rows.len(),
            Self::Values(values) => values.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    //
    // Views
    //

    /// Whole records, or `None` after a projection.
    #[must_use]
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            Self::Records(rows) => Some(rows),
            Self::Values(_) => None,
        }
    }

    /// Projected values, or `None` when no projection was set.
    #[must_use]
    pub fn values(&self) -> Option<&[Value]> {
        match self {
            Self::Records(_) => None,
            Self::Values(values) => Some(values),
        }
    }

    #[must_use]
    pub const fn is_projected(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    /// Flatten into values; records become `Value::Map`.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Self::Records(rows) => rows.into_iter().map(Value::from).collect(),
            Self::Values(values) => values,
        }
    }

    /// Render as a JSON array.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let items: Vec<serde_json::Value> = match self {
            Self::Records(rows) => rows
                .iter()
                .map(|row| Value::from(row.clone()).into())
                .collect(),
            Self::Values(values) => values.iter().cloned().map(Into::into).collect(),
        };

        serde_json::Value::Array(items)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::Records(Vec::new())
    }
}

impl IntoIterator for Response {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_values().into_iter()
    }
}
