//! Observability: per-query trace events and thread-local execution metrics.
//!
//! Neither surface changes query results.

pub(crate) mod metrics;
pub(crate) mod sink;
pub mod trace;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, PhaseCounters, RegistryCounters};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
pub use trace::{QueryTraceEvent, QueryTraceSink, TracePhase};
