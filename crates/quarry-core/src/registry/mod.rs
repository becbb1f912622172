//! Predicate registry: operator token → binary comparison function.
//!
//! Registries are explicit objects so executors and tests can run against
//! their own instance. A process-wide registry seeded with the built-ins backs
//! the free functions and is the default for every new `Query`.

mod builtin;

#[cfg(test)]
mod tests;

use crate::{
    obs::sink::{self, MetricsEvent},
    value::Value,
};
use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};

// re-exports
pub use builtin::BUILTIN_TOKENS;

static GLOBAL_REGISTRY: LazyLock<Arc<ConditionRegistry>> =
    LazyLock::new(|| Arc::new(ConditionRegistry::with_builtins()));

///
/// Condition
///
/// Shared comparison function `(field_value, operand) -> bool`.
/// `field_value` is `None` when the record does not carry the field.
///

#[derive(Clone)]
pub struct Condition(Arc<dyn Fn(Option<&Value>, &Value) -> bool + Send + Sync>);

impl Condition {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Evaluate against one field value and operand.
    #[must_use]
    pub fn test(&self, field: Option<&Value>, operand: &Value) -> bool {
        (self.0)(field, operand)
    }

    /// Returns true when both handles share one function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition(..)")
    }
}

///
/// ConditionRegistry
///
/// Token-keyed condition map behind a read/write lock.
/// Registration takes `&self` so a registry shared behind `Arc` can still be
/// extended; lookups clone the `Condition` handle out of the lock.
///

pub struct ConditionRegistry {
    conditions: RwLock<BTreeMap<String, Condition>>,
}

impl ConditionRegistry {
    /// Registry with no entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            conditions: RwLock::new(BTreeMap::new()),
        }
    }

    /// Registry pre-populated with every built-in operator.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self {
            conditions: RwLock::new(builtin::builtin_conditions()),
        }
    }

    /// Insert or overwrite the condition for `token`.
    /// Tokens are not validated.
    pub fn register<F>(&self, token: impl Into<String>, f: F)
    where
        F: Fn(Option<&Value>, &Value) -> bool + Send + Sync + 'static,
    {
        self.insert(token, Condition::new(f));
    }

    /// Insert or overwrite with an existing condition handle.
    pub fn insert(&self, token: impl Into<String>, condition: Condition) {
        let replaced = self
            .conditions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), condition)
            .is_some();

        sink::record(MetricsEvent::ConditionRegistered { replaced });
    }

    /// Look up the condition for `token`.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<Condition> {
        self.conditions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.conditions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(token)
    }

    /// Registered tokens in sorted order.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.conditions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Snapshot of the full registry.
    /// Later registrations do not show up in a snapshot already taken.
    #[must_use]
    pub fn all(&self) -> BTreeMap<String, Condition> {
        self.conditions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("tokens", &self.tokens())
            .finish()
    }
}

///
/// PROCESS-WIDE REGISTRY
///

/// Shared handle to the process-wide registry.
#[must_use]
pub fn global_registry() -> Arc<ConditionRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}

/// Register (or overwrite) a condition in the process-wide registry.
pub fn register_condition<F>(token: impl Into<String>, f: F)
where
    F: Fn(Option<&Value>, &Value) -> bool + Send + Sync + 'static,
{
    GLOBAL_REGISTRY.register(token, f);
}

/// Look up a condition in the process-wide registry.
#[must_use]
pub fn get_condition(token: &str) -> Option<Condition> {
    GLOBAL_REGISTRY.get(token)
}

/// Snapshot every condition in the process-wide registry.
#[must_use]
pub fn get_all_conditions() -> BTreeMap<String, Condition> {
    GLOBAL_REGISTRY.all()
}
