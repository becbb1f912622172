use super::*;
use crate::{
    filter::FilterSpec,
    obs::{metrics_report, metrics_reset_all, trace::QueryTraceEvent},
    order::OrderSpec,
    record,
};
use std::sync::Mutex;

// ---- helpers -----------------------------------------------------------

struct CapturingTrace {
    events: Mutex<Vec<QueryTraceEvent>>,
}

impl CapturingTrace {
    const fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    fn take(&self) -> Vec<QueryTraceEvent> {
        std::mem::take(&mut *self.events.lock().expect("trace lock"))
    }
}

impl QueryTraceSink for CapturingTrace {
    fn on_event(&self, event: QueryTraceEvent) {
        self.events.lock().expect("trace lock").push(event);
    }
}

fn people() -> Source {
    Source::new(vec![
        record! { "name" => "Bob", "age" => 20 },
        record! { "name" => "Rob", "age" => 42 },
        record! { "name" => "Tim", "age" => 21 },
    ])
}

fn settings() -> QuerySettings {
    QuerySettings {
        source: Some(people()),
        ..QuerySettings::default()
    }
}

fn run(settings: &QuerySettings) -> Result<Response, QueryError> {
    let registry = ConditionRegistry::with_builtins();
    QueryExecutor::new(settings, &registry, None).execute()
}

fn phase(phase: TracePhase, rows: u64) -> QueryTraceEvent {
    QueryTraceEvent::Phase { phase, rows }
}

// ---- pipeline ----------------------------------------------------------

#[test]
fn empty_settings_return_source_rows() {
    let settings = settings();
    let response = run(&settings).expect("execute");

    assert_eq!(response.records(), Some(people().records()));
}

#[test]
fn missing_source_yields_empty_records() {
    let response = run(&QuerySettings::default()).expect("execute");

    assert_eq!(response, Response::Records(Vec::new()));
}

#[test]
fn projection_of_missing_field_yields_null() {
    let mut settings = settings();
    settings.projection = Some("email".into());

    let response = run(&settings).expect("execute");
    assert_eq!(response.values(), Some(&[Value::Null, Value::Null, Value::Null][..]));
}

#[test]
fn window_applies_after_projection() {
    let mut settings = settings();
    settings.projection = Some("name".into());
    settings.offset = Some(1);
    settings.limit = Some(1);

    let response = run(&settings).expect("execute");
    assert_eq!(response.values(), Some(&[Value::from("Rob")][..]));
}

#[test]
fn full_pipeline_order_is_fixed() {
    let mut settings = settings();
    settings.filter = Some(FilterSpec::expr_with("age >= ?", 21));
    settings.order = Some(OrderSpec::asc("age"));
    settings.projection = Some("name".into());
    settings.limit = Some(5);

    let response = run(&settings).expect("execute");
    assert_eq!(
        response.values(),
        Some(&[Value::from("Tim"), Value::from("Rob")][..])
    );
}

#[test]
fn source_is_left_untouched() {
    let source = people();
    let mut settings = QuerySettings {
        source: Some(source.clone()),
        ..QuerySettings::default()
    };
    settings.order = Some(OrderSpec::desc("age"));

    let _ = run(&settings).expect("execute");

    assert_eq!(source.records(), people().records());
}

// ---- validation --------------------------------------------------------

#[test]
fn configuration_errors_surface_even_without_rows() {
    let mut settings = QuerySettings::default();
    settings.filter = Some(FilterSpec::expr_with("age ~= ?", 1));

    let err = run(&settings).unwrap_err();
    assert!(matches!(err, QueryError::UnknownOperator { .. }));

    let mut settings = QuerySettings::default();
    settings.order = Some(OrderSpec::asc(""));

    let err = run(&settings).unwrap_err();
    assert!(matches!(err, QueryError::InvalidOrderSpec { .. }));
}

#[test]
fn filter_errors_take_precedence_over_order_errors() {
    let mut settings = settings();
    settings.filter = Some(FilterSpec::expr("age >"));
    settings.order = Some(OrderSpec::asc(" "));

    let err = run(&settings).unwrap_err();
    assert!(matches!(err, QueryError::MalformedFilterExpression { .. }));
}

// ---- observability -----------------------------------------------------

#[test]
fn trace_reports_each_applied_phase() {
    static TRACE: CapturingTrace = CapturingTrace::new();

    let mut settings = settings();
    settings.filter = Some(FilterSpec::expr_with("age > ?", 20));
    settings.order = Some(OrderSpec::desc("age"));
    settings.limit = Some(1);

    let registry = ConditionRegistry::with_builtins();
    let response = QueryExecutor::new(&settings, &registry, Some(&TRACE))
        .execute()
        .expect("execute");
    assert_eq!(response.len(), 1);

    assert_eq!(
        TRACE.take(),
        vec![
            QueryTraceEvent::Start { source_rows: 3 },
            phase(TracePhase::Clone, 3),
            phase(TracePhase::Filter, 2),
            phase(TracePhase::Order, 2),
            phase(TracePhase::Limit, 1),
            QueryTraceEvent::Finish { rows: 1 },
        ]
    );
}

#[test]
fn trace_reports_errors_with_classification() {
    static TRACE: CapturingTrace = CapturingTrace::new();

    let mut settings = settings();
    settings.order = Some(OrderSpec::asc(""));

    let registry = ConditionRegistry::with_builtins();
    let err = QueryExecutor::new(&settings, &registry, Some(&TRACE))
        .execute()
        .unwrap_err();

    assert_eq!(
        TRACE.take(),
        vec![
            QueryTraceEvent::Start { source_rows: 3 },
            QueryTraceEvent::Error {
                class: err.class(),
                origin: err.origin(),
            },
        ]
    );
}

#[test]
fn metrics_count_scans_filters_and_errors() {
    metrics_reset_all();

    let mut settings = settings();
    settings.filter = Some(FilterSpec::expr_with("name *= ?", "o"));
    settings.offset = Some(1);
    run(&settings).expect("execute");

    settings.filter = Some(FilterSpec::expr_with("name ~= ?", "o"));
    run(&settings).unwrap_err();

    let counters = metrics_report().counters;
    assert_eq!(counters.ops.exec_calls, 2);
    assert_eq!(counters.ops.exec_errors, 1);
    assert_eq!(counters.ops.rows_scanned, 3);
    assert_eq!(counters.ops.rows_filtered_out, 1);
    assert_eq!(counters.ops.rows_returned, 1);
    assert_eq!(counters.phases.filter, 1);
    assert_eq!(counters.phases.offset, 1);
    assert_eq!(counters.phases.order, 0);
}
