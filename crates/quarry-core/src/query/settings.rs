use crate::{filter::FilterSpec, order::OrderSpec, record::Source};

///
/// QuerySettings
///
/// Configuration accumulated by the builder chain.
/// Every field is optional and an absent field is a pipeline no-op.
/// Cloning copies every field; the `Source` handle is shared.
///

#[derive(Clone, Debug, Default)]
pub struct QuerySettings {
    pub source: Option<Source>,
    pub filter: Option<FilterSpec>,
    pub projection: Option<String>,
    pub order: Option<OrderSpec>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl QuerySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows execution will scan.
    #[must_use]
    pub fn source_len(&self) -> usize {
        self.source.as_ref().map_or(0, |source| source.len())
    }

    /// Returns true when no pipeline stage is configured.
    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        self.filter.is_none()
            && self.projection.is_none()
            && self.order.is_none()
            && self.limit.is_none()
            && self.offset.is_none()
    }
}
