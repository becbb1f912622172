//! Named, saved queries loaded from TOML.
//!
//! ```toml
//! [queries.adults]
//! where = "age >= ?"
//! operand = 21
//! select = "name"
//! order = "age"
//! desc = true
//! limit = 10
//! ```
//!
//! Each table under `queries` is a `QuerySpec`; unknown keys are rejected.


use quarry_core::{
    query::{Query, QuerySpec},
    record::Source,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read query config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse query config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize query config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown query '{name}'")]
    UnknownQuery { name: String },
}

///
/// QueryConfig
///
/// Named query specs keyed by name, kept in sorted order.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    #[serde(default)]
    pub queries: BTreeMap<String, QuerySpec>,
}

impl QueryConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&input)
    }

    /// Render back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Insert or replace a named spec, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, spec: QuerySpec) -> Option<QuerySpec> {
        self.queries.insert(name.into(), spec)
    }

    /// Look up a named spec.
    pub fn get(&self, name: &str) -> Result<&QuerySpec, ConfigError> {
        self.queries
            .get(name)
            .ok_or_else(|| ConfigError::UnknownQuery {
                name: name.to_string(),
            })
    }

    /// Build the named query over `source`.
    pub fn query(&self, name: &str, source: impl Into<Source>) -> Result<Query, ConfigError> {
        let spec = self.get(name)?;

        Ok(Query::from_spec(spec).from(source))
    }

    /// Query names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
