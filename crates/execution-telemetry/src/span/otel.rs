use std::{
    borrow::Cow,
    sync::{Arc, OnceLock},
};

use opentelemetry::{
    global::{self, BoxedTracer},
    trace::{Span, Status, Tracer, TracerProvider},
    KeyValue,
};

use super::{SpanSource, TelemetrySpan};

/// Starts execution spans on an OpenTelemetry [Tracer].
pub struct OtelSpanSource<T = BoxedTracer> {
    tracer: T,
}

impl<T: Tracer> OtelSpanSource<T> {
    pub fn new(tracer: T) -> Self {
        Self { tracer }
    }
}

impl OtelSpanSource {
    /// The process-wide source, built from the global tracer provider on first use.
    ///
    /// The global tracer provider must be installed before the first call, spans go nowhere
    /// otherwise.
    pub fn global() -> Arc<OtelSpanSource> {
        static SOURCE: OnceLock<Arc<OtelSpanSource>> = OnceLock::new();

        SOURCE
            .get_or_init(|| {
                let tracer = global::tracer_provider().versioned_tracer(
                    crate::SCOPE,
                    Some(crate::SCOPE_VERSION),
                    None::<&'static str>,
                    None,
                );

                Arc::new(OtelSpanSource::new(tracer))
            })
            .clone()
    }
}

impl<T> SpanSource for OtelSpanSource<T>
where
    T: Tracer + Send + Sync + 'static,
    T::Span: Send + Sync + 'static,
{
    type Span = OtelSpan<T::Span>;

    fn start_span(&self, name: &'static str) -> Option<Self::Span> {
        let span = self.tracer.start(name);

        // Either no tracer provider is installed or the sampler dropped the span.
        if !span.is_recording() {
            return None;
        }

        Some(OtelSpan(span))
    }
}

/// An OpenTelemetry span. A span that is recorded but not sampled for export does not request
/// all data.
pub struct OtelSpan<S>(S);

impl<S> TelemetrySpan for OtelSpan<S>
where
    S: Span + Send + Sync + 'static,
{
    fn set_attribute(&mut self, attribute: KeyValue) {
        self.0.set_attribute(attribute);
    }

    fn set_status_error(&mut self, description: Cow<'static, str>) {
        self.0.set_status(Status::error(description));
    }

    fn set_display_name(&mut self, name: Cow<'static, str>) {
        self.0.update_name(name);
    }

    fn record_exception(&mut self, error: &dyn std::error::Error) {
        self.0.record_error(error);
    }

    fn is_all_data_requested(&self) -> bool {
        self.0.span_context().is_sampled()
    }

    fn end(&mut self) {
        self.0.end();
    }
}
