//! Metrics sink boundary.
//!
//! Executor and registry logic MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only bridge between execution logic and the
//! thread-local metrics state.
use crate::obs::{metrics, trace::TracePhase};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    ExecStart,
    ExecFinish { rows_returned: u64 },
    ExecError,
    RowsScanned { rows_scanned: u64 },
    RowsFiltered { rows_removed: u64 },
    Phase { phase: TracePhase },
    ConditionRegistered { replaced: bool },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.
///

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart => {
                metrics::with_state_mut(|m| m.ops.exec_calls = m.ops.exec_calls.saturating_add(1));
            }

            MetricsEvent::ExecFinish { rows_returned } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_returned = m.ops.rows_returned.saturating_add(rows_returned);
                });
            }

            MetricsEvent::ExecError => {
                metrics::with_state_mut(|m| {
                    m.ops.exec_errors = m.ops.exec_errors.saturating_add(1);
                });
            }

            MetricsEvent::RowsScanned { rows_scanned } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows_scanned);
                });
            }

            MetricsEvent::RowsFiltered { rows_removed } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_filtered_out = m.ops.rows_filtered_out.saturating_add(rows_removed);
                });
            }

            MetricsEvent::Phase { phase } => {
                metrics::with_state_mut(|m| {
                    let counter = match phase {
                        TracePhase::Filter => &mut m.phases.filter,
                        TracePhase::Order => &mut m.phases.order,
                        TracePhase::Project => &mut m.phases.project,
                        TracePhase::Offset => &mut m.phases.offset,
                        TracePhase::Limit => &mut m.phases.limit,
                        TracePhase::Clone => return,
                    };
                    *counter = counter.saturating_add(1);
                });
            }

            MetricsEvent::ConditionRegistered { replaced } => {
                metrics::with_state_mut(|m| {
                    if replaced {
                        m.registry.replaced = m.registry.replaced.saturating_add(1);
                    } else {
                        m.registry.registered = m.registry.registered.saturating_add(1);
                    }
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state for test/reporting plumbing.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state on this thread.
pub fn metrics_reset_all() {
    metrics::reset();
}

/// Run a closure with a temporary metrics sink override on this thread.
///
/// The previous sink is restored on every exit, including unwinding.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
