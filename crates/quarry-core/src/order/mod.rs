//! Ordering specifications and the stable sort applied by the executor.

#[cfg(test)]
mod tests;

use crate::{
    error::QueryError,
    record::Record,
    value::{Value, canonical_cmp},
};
use std::{cmp::Ordering, fmt, sync::Arc};

// Sort key for records that do not carry the order field.
static MISSING: Value = Value::Null;

///
/// OrderDirection
/// Ordering direction applied after filtering.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn from_descending(descending: bool) -> Self {
        if descending { Self::Desc } else { Self::Asc }
    }

    #[must_use]
    pub const fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }

    /// Orient an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

///
/// RecordComparator
///
/// Caller-supplied comparator over whole records.
/// The executor sorts with it unchanged, so it must describe a total order.
///
/// # Panics
///
/// Sorting may panic when the comparator is inconsistent (for example it
/// reports `a < b` and `b < a`), as `slice::sort_by` detects such orders.
/// A comparator that always returns `Ordering::Equal` is total and keeps the
/// filtered order.
///

#[derive(Clone)]
pub struct RecordComparator(Arc<dyn Fn(&Record, &Record) -> Ordering + Send + Sync>);

impl RecordComparator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Record, &Record) -> Ordering + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn compare(&self, left: &Record, right: &Record) -> Ordering {
        (self.0)(left, right)
    }
}

impl fmt::Debug for RecordComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RecordComparator(..)")
    }
}

///
/// OrderSpec
///
/// Field      → stable sort on one field under the canonical value order;
///              a missing field sorts as `Null`.
/// Comparator → stable sort delegated to the caller's comparator.
///

#[derive(Clone, Debug)]
pub enum OrderSpec {
    Field {
        field: String,
        direction: OrderDirection,
    },
    Comparator(RecordComparator),
}

impl OrderSpec {
    pub fn field(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self::Field {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::field(field, OrderDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::field(field, OrderDirection::Desc)
    }

    pub fn comparator<F>(f: F) -> Self
    where
        F: Fn(&Record, &Record) -> Ordering + Send + Sync + 'static,
    {
        Self::Comparator(RecordComparator::new(f))
    }

    /// Reject field orders that name no field.
    pub(crate) fn validate(&self) -> Result<(), QueryError> {
        match self {
            Self::Field { field, .. } if field.trim().is_empty() => {
                Err(QueryError::invalid_order("field name is empty"))
            }
            Self::Field { .. } | Self::Comparator(_) => Ok(()),
        }
    }
}

impl From<RecordComparator> for OrderSpec {
    fn from(comparator: RecordComparator) -> Self {
        Self::Comparator(comparator)
    }
}

/// Stable in-place sort of borrowed records.
pub(crate) fn apply_order(rows: &mut [&Record], order: &OrderSpec) {
    match order {
        OrderSpec::Field { field, direction } => {
            rows.sort_by(|left, right| direction.apply(compare_field(left, right, field)));
        }
        OrderSpec::Comparator(comparator) => {
            rows.sort_by(|left, right| comparator.compare(left, right));
        }
    }
}

fn compare_field(left: &Record, right: &Record, field: &str) -> Ordering {
    canonical_cmp(
        left.get(field).unwrap_or(&MISSING),
        right.get(field).unwrap_or(&MISSING),
    )
}
