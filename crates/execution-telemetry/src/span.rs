use std::{
    borrow::Cow,
    sync::{Arc, Mutex, PoisonError},
};

use opentelemetry::KeyValue;

/// OpenTelemetry backend
pub mod otel;

/// The name of the span wrapping an execution
pub const EXECUTE_SPAN_NAME: &str = "graphql.execute";

/// Attribute key under which the gql operation name is recorded
pub const GRAPHQL_OPERATION_NAME_ATTRIBUTE: &str = "graphql.operation.name";
/// Attribute key under which the gql operation type is recorded
pub const GRAPHQL_OPERATION_TYPE_ATTRIBUTE: &str = "graphql.operation.type";
/// Attribute key under which the sanitized document is recorded
pub const GRAPHQL_DOCUMENT_ATTRIBUTE: &str = "graphql.document";
/// Attribute key under which the number of errors in the response is recorded
pub const GRAPHQL_RESPONSE_ERRORS_COUNT_ATTRIBUTE: &str = "graphql.response.errors.count";

/// A span started by a [SpanSource] for one execution.
pub trait TelemetrySpan: Send + 'static {
    /// Sets an attribute, replacing any previous value under the same key
    fn set_attribute(&mut self, attribute: KeyValue);

    /// Marks the span as failed
    fn set_status_error(&mut self, description: Cow<'static, str>);

    /// Changes the name shown for this span
    fn set_display_name(&mut self, name: Cow<'static, str>);

    /// Records an error that escaped the pipeline
    fn record_exception(&mut self, error: &dyn std::error::Error) {
        let _ = error;
    }

    /// Whether the backend wants every detail about this span. Expensive attributes are only
    /// computed when it does.
    fn is_all_data_requested(&self) -> bool;

    /// Ends the span. Called exactly once.
    fn end(&mut self);
}

/// Factory of execution spans.
pub trait SpanSource: Send + Sync + 'static {
    type Span: TelemetrySpan;

    /// Starts a new span, or returns `None` if the backend is not interested in it.
    fn start_span(&self, name: &'static str) -> Option<Self::Span>;
}

impl<T: SpanSource> SpanSource for Arc<T> {
    type Span = T::Span;

    fn start_span(&self, name: &'static str) -> Option<Self::Span> {
        self.as_ref().start_span(name)
    }
}

/// Span shared between the provider and the listener of a single request.
///
/// Enrichment calls are sequential within a request so the lock is never contended.
pub(crate) struct ActiveSpan<S> {
    inner: Arc<Mutex<Option<S>>>,
}

impl<S> Clone for ActiveSpan<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: TelemetrySpan> ActiveSpan<S> {
    pub(crate) fn new(span: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(span))),
        }
    }

    /// Runs `f` on the span unless it already ended.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        let mut span = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        span.as_mut().map(f)
    }

    pub(crate) fn end(&self) {
        let span = self.inner.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(mut span) = span {
            span.end();
        }
    }

    /// Ends the span when the guard goes out of scope, whichever way the scope is left.
    pub(crate) fn guard(&self) -> SpanGuard<S> {
        SpanGuard { span: self.clone() }
    }
}

pub(crate) struct SpanGuard<S: TelemetrySpan> {
    span: ActiveSpan<S>,
}

impl<S: TelemetrySpan> Drop for SpanGuard<S> {
    fn drop(&mut self) {
        self.span.end();
    }
}
