//! Executor query tracing boundary.
//!
//! Tracing is optional, injected per query by the caller, and must not affect
//! execution semantics.

use crate::error::{ErrorClass, ErrorOrigin, QueryError};

///
/// QueryTraceSink
///

pub trait QueryTraceSink: Send + Sync {
    fn on_event(&self, event: QueryTraceEvent);
}

///
/// TracePhase
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TracePhase {
    Clone,
    Filter,
    Order,
    Project,
    Offset,
    Limit,
}

///
/// QueryTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryTraceEvent {
    Start {
        source_rows: u64,
    },
    Phase {
        phase: TracePhase,
        rows: u64,
    },
    Finish {
        rows: u64,
    },
    Error {
        class: ErrorClass,
        origin: ErrorOrigin,
    },
}

///
/// TraceScope
/// One execution's view of an optional sink.
///

pub(crate) struct TraceScope {
    sink: Option<&'static dyn QueryTraceSink>,
}

impl TraceScope {
    pub(crate) fn start(sink: Option<&'static dyn QueryTraceSink>, source_rows: usize) -> Self {
        let scope = Self { sink };
        scope.emit(QueryTraceEvent::Start {
            source_rows: to_u64(source_rows),
        });

        scope
    }

    pub(crate) fn phase(&self, phase: TracePhase, rows: usize) {
        self.emit(QueryTraceEvent::Phase {
            phase,
            rows: to_u64(rows),
        });
    }

    pub(crate) fn finish(self, rows: usize) {
        self.emit(QueryTraceEvent::Finish { rows: to_u64(rows) });
    }

    pub(crate) fn error(self, err: &QueryError) {
        self.emit(QueryTraceEvent::Error {
            class: err.class(),
            origin: err.origin(),
        });
    }

    fn emit(&self, event: QueryTraceEvent) {
        if let Some(sink) = self.sink {
            sink.on_event(event);
        }
    }
}

pub(crate) fn to_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}
