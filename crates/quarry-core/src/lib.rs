//! Core engine for quarry: an in-memory, chainable query builder over
//! sequences of records, with a pluggable operator registry.
//!
//! A query accumulates `QuerySettings` through the builder chain and runs the
//! fixed pipeline clone → filter → order → project → offset → limit on every
//! `execute`. The source is never mutated.
#![warn(unreachable_pub)]

mod macros;

// public exports are one module level down
pub mod error;
pub mod filter;
pub mod obs;
pub mod order;
pub mod query;
pub mod record;
pub mod registry;
pub mod response;
pub mod value;

mod executor;

use crate::{query::Query, record::Source};

/// Start a query, optionally seeded with a source.
#[must_use]
pub fn new_query(source: Option<Source>) -> Query {
    match source {
        Some(source) => Query::with_source(source),
        None => Query::new(),
    }
}

///
/// Prelude
///
/// Prelude contains only query vocabulary.
/// No executors, sinks, or metrics helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        error::QueryError,
        filter::FilterSpec,
        new_query,
        order::{OrderDirection, OrderSpec},
        query::{Query, QuerySpec},
        record,
        record::{Record, Source},
        registry::{ConditionRegistry, get_all_conditions, get_condition, register_condition},
        response::Response,
        value::Value,
    };
}
