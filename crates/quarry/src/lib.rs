//! ## Crate layout
//! - `core`: values, records, the operator registry, the builder and its
//!   execution pipeline, errors, and observability.
//! - `config`: named queries loaded from TOML (feature `config`).
//!
//! The `prelude` module carries the vocabulary needed to build and run
//! queries; everything else stays one module level down.

pub use quarry_core as core;

#[cfg(feature = "config")]
pub use quarry_config as config;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Root surface
//

pub use quarry_core::{
    error::QueryError,
    new_query,
    query::{Query, QuerySettings, QuerySpec},
    record,
    registry::{get_all_conditions, get_condition, register_condition},
    response::Response,
};

///
/// Prelude
///

pub mod prelude {
    pub use quarry_core::prelude::*;

    #[cfg(feature = "config")]
    pub use quarry_config::{ConfigError, QueryConfig};
}
