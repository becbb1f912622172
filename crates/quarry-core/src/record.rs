use crate::value::Value;
use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error as ThisError;

///
/// Record
///
/// One element of a source: a field-name to value mapping.
/// The engine never interprets record shape beyond the field lookups it is
/// told to perform.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Look up one field. `None` means the record does not carry the field,
    /// which is distinct from carrying an explicit `Value::Null`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Insert or replace a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    #[must_use]
    pub fn into_fields(self) -> BTreeMap<String, Value> {
        self.fields
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Map(record.into_fields())
    }
}

///
/// RecordShapeError
///
/// Raised when a JSON value cannot become a record (it is not an object).
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("record must be a JSON object, found {kind}")]
pub struct RecordShapeError {
    pub kind: &'static str,
}

impl TryFrom<serde_json::Value> for Record {
    type Error = RecordShapeError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match Value::from(json) {
            Value::Map(fields) => Ok(Self { fields }),
            other => Err(RecordShapeError {
                kind: other.kind_label(),
            }),
        }
    }
}

///
/// Source
///
/// Shared, immutable, ordered sequence of records.
/// Cloning a `Source` shares the same allocation; queries only ever read it.
///

#[derive(Clone, Debug, Default, Deref, PartialEq)]
pub struct Source(Arc<[Record]>);

impl Source {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self(records.into())
    }

    /// Build a source from a JSON array of objects.
    pub fn from_json(json: serde_json::Value) -> Result<Self, RecordShapeError> {
        let items = match json {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(RecordShapeError {
                    kind: Value::from(other).kind_label(),
                });
            }
        };

        items
            .into_iter()
            .map(Record::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Returns true when both handles point at the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.0
    }
}

impl From<Vec<Record>> for Source {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl From<&[Record]> for Source {
    fn from(records: &[Record]) -> Self {
        Self(records.into())
    }
}

impl From<Arc<[Record]>> for Source {
    fn from(records: Arc<[Record]>) -> Self {
        Self(records)
    }
}

impl FromIterator<Record> for Source {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
