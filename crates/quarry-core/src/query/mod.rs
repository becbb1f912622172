//! Fluent query builder and its scope fork.
//!
//! Builder calls only record configuration; nothing is validated until
//! `execute`, so a chain can be assembled in any order.

mod settings;
mod spec;


use crate::{
    error::QueryError,
    executor::QueryExecutor,
    filter::FilterSpec,
    obs::trace::QueryTraceSink,
    order::{OrderDirection, OrderSpec},
    record::{Record, Source},
    registry::{ConditionRegistry, global_registry},
    response::Response,
    value::Value,
};
use std::{cmp::Ordering, fmt, sync::Arc};

// re-exports
pub use settings::QuerySettings;
pub use spec::QuerySpec;

///
/// Query
///
/// Chainable builder owning one `QuerySettings`.
/// Every configuration method consumes and returns the builder; `scope`
/// forks an independent copy without touching the caller.
///

#[derive(Clone)]
pub struct Query {
    settings: QuerySettings,
    registry: Arc<ConditionRegistry>,
    trace: Option<&'static dyn QueryTraceSink>,
}

impl Query {
    /// Empty query over no source, backed by the process-wide registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: QuerySettings::default(),
            registry: global_registry(),
            trace: None,
        }
    }

    /// Query seeded with a source.
    #[must_use]
    pub fn with_source(source: impl Into<Source>) -> Self {
        Self::new().from(source)
    }

    /// Build a query from its data-only form.
    #[must_use]
    pub fn from_spec(spec: &QuerySpec) -> Self {
        Self::new().apply_spec(spec)
    }

    //
    // Configuration
    //

    /// Replace the source.
    #[must_use]
    pub fn from(mut self, source: impl Into<Source>) -> Self {
        self.settings.source = Some(source.into());
        self
    }

    /// Project each surviving record onto one field.
    #[must_use]
    pub fn select(mut self, field: impl Into<String>) -> Self {
        self.settings.projection = Some(field.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.settings.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.settings.offset = Some(offset);
        self
    }

    /// Replace the filter.
    #[must_use]
    pub fn filter(mut self, spec: impl Into<FilterSpec>) -> Self {
        self.settings.filter = Some(spec.into());
        self
    }

    /// Filter by `"<field> <operator> <literal>"`; the literal is a text operand.
    #[must_use]
    pub fn where_expr(self, expression: impl Into<String>) -> Self {
        self.filter(FilterSpec::expr(expression))
    }

    /// Filter by `"<field> <operator> ?"` with a separately supplied operand.
    #[must_use]
    pub fn where_with(self, expression: impl Into<String>, operand: impl Into<Value>) -> Self {
        self.filter(FilterSpec::expr_with(expression, operand))
    }

    /// Filter with a predicate over whole records.
    #[must_use]
    pub fn where_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.filter(FilterSpec::predicate(f))
    }

    /// Replace the order with a field order.
    #[must_use]
    pub fn order(self, field: impl Into<String>, descending: bool) -> Self {
        self.order_spec(OrderSpec::field(
            field,
            OrderDirection::from_descending(descending),
        ))
    }

    #[must_use]
    pub fn order_by(self, field: impl Into<String>) -> Self {
        self.order_spec(OrderSpec::asc(field))
    }

    #[must_use]
    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.order_spec(OrderSpec::desc(field))
    }

    /// Replace the order with a caller comparator.
    ///
    /// # Panics
    ///
    /// `execute` may panic if `cmp` is not a total order; see
    /// [`RecordComparator`](crate::order::RecordComparator).
    #[must_use]
    pub fn order_with<F>(self, cmp: F) -> Self
    where
        F: Fn(&Record, &Record) -> Ordering + Send + Sync + 'static,
    {
        self.order_spec(OrderSpec::comparator(cmp))
    }

    #[must_use]
    pub fn order_spec(mut self, order: OrderSpec) -> Self {
        self.settings.order = Some(order);
        self
    }

    /// Resolve operators against `registry` instead of the process-wide one.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<ConditionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Attach a trace sink to every execution of this query.
    #[must_use]
    pub fn trace(mut self, sink: &'static dyn QueryTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Overlay the fields a spec sets onto this query.
    #[must_use]
    pub fn apply_spec(mut self, spec: &QuerySpec) -> Self {
        if let Some(expression) = &spec.filter {
            self.settings.filter = Some(FilterSpec::Expression {
                expression: expression.clone(),
                operand: spec.operand.clone(),
            });
        }
        if let Some(field) = &spec.select {
            self.settings.projection = Some(field.clone());
        }
        if let Some(field) = &spec.order {
            self.settings.order = Some(OrderSpec::field(
                field.clone(),
                OrderDirection::from_descending(spec.desc),
            ));
        }
        if let Some(limit) = spec.limit {
            self.settings.limit = Some(limit);
        }
        if let Some(offset) = spec.offset {
            self.settings.offset = Some(offset);
        }

        self
    }

    //
    // Fork
    //

    /// Independent copy of this builder.
    /// Settings are copied field by field; the source allocation is shared.
    #[must_use]
    pub fn scope(&self) -> Self {
        self.clone()
    }

    //
    // Inspection
    //

    #[must_use]
    pub const fn settings(&self) -> &QuerySettings {
        &self.settings
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<ConditionRegistry> {
        &self.registry
    }

    /// Data-only form of the current settings.
    /// Returns `None` when the settings hold a predicate or comparator closure.
    #[must_use]
    pub fn to_spec(&self) -> Option<QuerySpec> {
        let (filter, operand) = match &self.settings.filter {
            None => (None, None),
            Some(FilterSpec::Expression {
                expression,
                operand,
            }) => (Some(expression.clone()), operand.clone()),
            Some(FilterSpec::Predicate(_)) => return None,
        };
        let (order, desc) = match &self.settings.order {
            None => (None, false),
            Some(OrderSpec::Field { field, direction }) => {
                (Some(field.clone()), direction.is_desc())
            }
            Some(OrderSpec::Comparator(_)) => return None,
        };

        Some(QuerySpec {
            filter,
            operand,
            select: self.settings.projection.clone(),
            order,
            desc,
            limit: self.settings.limit,
            offset: self.settings.offset,
        })
    }

    //
    // Execution
    //

    /// Run the pipeline against the current settings.
    /// Repeated calls with unchanged settings return equal responses.
    pub fn execute(&self) -> Result<Response, QueryError> {
        QueryExecutor::new(&self.settings, &self.registry, self.trace).execute()
    }

    /// Alias for [`Query::execute`].
    pub fn q(&self) -> Result<Response, QueryError> {
        self.execute()
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("settings", &self.settings)
            .field("traced", &self.trace.is_some())
            .finish_non_exhaustive()
    }
}
