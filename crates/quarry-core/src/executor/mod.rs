//! Module: executor
//! Responsibility: turn accumulated `QuerySettings` into a `Response`.
//!
//! Pipeline, each stage applied only when its setting is present:
//! clone → filter → order → project → offset → limit.
//!
//! All configuration is validated before the first row is touched, so an
//! execution either returns a complete response or fails with no result.

mod window;

#[cfg(test)]
mod tests;

use crate::{
    error::QueryError,
    filter::CompiledFilter,
    obs::{
        sink::{self, MetricsEvent},
        trace::{QueryTraceSink, TracePhase, TraceScope, to_u64},
    },
    order::apply_order,
    query::QuerySettings,
    record::{Record, Source},
    registry::ConditionRegistry,
    response::Response,
    value::Value,
};

// Projection result for records that do not carry the selected field.
static MISSING: Value = Value::Null;

///
/// QueryExecutor
///
/// One execution over borrowed settings.
/// Rows stay borrowed from the source until the final window is known;
/// only surviving rows are cloned into the response.
///

pub(crate) struct QueryExecutor<'a> {
    settings: &'a QuerySettings,
    registry: &'a ConditionRegistry,
    trace: Option<&'static dyn QueryTraceSink>,
}

impl<'a> QueryExecutor<'a> {
    pub(crate) const fn new(
        settings: &'a QuerySettings,
        registry: &'a ConditionRegistry,
        trace: Option<&'static dyn QueryTraceSink>,
    ) -> Self {
        Self {
            settings,
            registry,
            trace,
        }
    }

    pub(crate) fn execute(&self) -> Result<Response, QueryError> {
        sink::record(MetricsEvent::ExecStart);
        let trace = TraceScope::start(self.trace, self.settings.source_len());

        match self.run(&trace) {
            Ok(response) => {
                sink::record(MetricsEvent::ExecFinish {
                    rows_returned: to_u64(response.len()),
                });
                trace.finish(response.len());

                Ok(response)
            }
            Err(err) => {
                sink::record(MetricsEvent::ExecError);
                trace.error(&err);

                Err(err)
            }
        }
    }

    fn run(&self, trace: &TraceScope) -> Result<Response, QueryError> {
        let filter = self
            .settings
            .filter
            .as_ref()
            .map(|spec| CompiledFilter::compile(spec, self.registry))
            .transpose()?;
        if let Some(order) = &self.settings.order {
            order.validate()?;
        }

        // Clone: a shallow copy of the source as borrowed rows.
        let mut rows: Vec<&Record> = self
            .settings
            .source
            .as_ref()
            .map_or(&[][..], Source::records)
            .iter()
            .collect();
        sink::record(MetricsEvent::RowsScanned {
            rows_scanned: to_u64(rows.len()),
        });
        Self::phase(trace, TracePhase::Clone, rows.len());

        if let Some(filter) = &filter {
            let scanned = rows.len();
            rows.retain(|row| filter.matches(row));
            sink::record(MetricsEvent::RowsFiltered {
                rows_removed: to_u64(scanned - rows.len()),
            });
            Self::phase(trace, TracePhase::Filter, rows.len());
        }

        if let Some(order) = &self.settings.order {
            apply_order(&mut rows, order);
            Self::phase(trace, TracePhase::Order, rows.len());
        }

        let response = match &self.settings.projection {
            Some(field) => {
                let mut values: Vec<&Value> = rows
                    .iter()
                    .map(|row| row.get(field).unwrap_or(&MISSING))
                    .collect();
                Self::phase(trace, TracePhase::Project, values.len());
                self.apply_window(trace, &mut values);

                Response::Values(values.into_iter().cloned().collect())
            }
            None => {
                self.apply_window(trace, &mut rows);

                Response::Records(rows.into_iter().cloned().collect())
            }
        };

        Ok(response)
    }

    // Offset then limit, each only when set.
    fn apply_window<T>(&self, trace: &TraceScope, rows: &mut Vec<T>) {
        if let Some(offset) = self.settings.offset {
            window::apply_offset(rows, offset);
            Self::phase(trace, TracePhase::Offset, rows.len());
        }

        if let Some(limit) = self.settings.limit {
            window::apply_limit(rows, limit);
            Self::phase(trace, TracePhase::Limit, rows.len());
        }
    }

    fn phase(trace: &TraceScope, phase: TracePhase, rows: usize) {
        sink::record(MetricsEvent::Phase { phase });
        trace.phase(phase, rows);
    }
}
