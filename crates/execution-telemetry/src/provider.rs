use std::{future::Future, sync::Arc};

use crate::{
    error::ExecutionError,
    hooks::{DefaultHooks, TelemetryHooks},
    listener::OperationListener,
    options::TelemetryOptions,
    request::ExecutionRequest,
    response::ExecutionResult,
    span::{ActiveSpan, SpanSource, TelemetrySpan, EXECUTE_SPAN_NAME},
    GRAFBASE_TARGET,
};

/// Wraps executions of the request pipeline in a span.
pub struct TelemetryProvider<S, H = DefaultHooks> {
    source: S,
    options: Arc<TelemetryOptions>,
    hooks: Arc<H>,
}

impl<S: SpanSource> TelemetryProvider<S> {
    pub fn new(source: S, options: TelemetryOptions) -> Self {
        Self::with_hooks(source, options, DefaultHooks)
    }
}

impl<S: SpanSource, H: TelemetryHooks> TelemetryProvider<S, H> {
    pub fn with_hooks(source: S, options: TelemetryOptions, hooks: H) -> Self {
        Self {
            source,
            options: Arc::new(options),
            hooks: Arc::new(hooks),
        }
    }

    pub fn options(&self) -> &TelemetryOptions {
        &self.options
    }

    /// Runs `next`, the rest of the pipeline, inside an execution span.
    ///
    /// The result or error of `next` is returned untouched. Requests rejected by the filter, or
    /// for which the backend does not want a span, go straight to `next`.
    pub async fn execute<F, Fut>(&self, mut request: ExecutionRequest, next: F) -> Result<ExecutionResult, ExecutionError>
    where
        F: FnOnce(ExecutionRequest) -> Fut,
        Fut: Future<Output = Result<ExecutionResult, ExecutionError>>,
    {
        if !self.options.filter(&request) {
            tracing::debug!(target: GRAFBASE_TARGET, "execution not traced, rejected by the filter");
            return next(request).await;
        }

        let Some(span) = self.source.start_span(EXECUTE_SPAN_NAME) else {
            tracing::debug!(target: GRAFBASE_TARGET, "execution not traced, no span was started");
            return next(request).await;
        };

        let span = ActiveSpan::new(span);
        // Ends the span on every way out, including this future being dropped.
        let _guard = span.guard();

        span.with(|span| self.hooks.enrich_with_request(span, &self.options, &request));

        request.add_listener(Arc::new(OperationListener::new(
            span.clone(),
            self.options.clone(),
            self.hooks.clone(),
        )));

        let request_view = request.clone();

        match next(request).await {
            Ok(result) => {
                span.with(|span| {
                    self.hooks
                        .enrich_with_result(span, &self.options, &request_view, &result)
                });

                Ok(result)
            }
            Err(error) if error.is_canceled() => {
                tracing::debug!(target: GRAFBASE_TARGET, "execution canceled");
                Err(error)
            }
            Err(error) => {
                span.with(|span| self.record_exception(span, &error));
                tracing::error!(target: GRAFBASE_TARGET, "execution failed: {error}");

                Err(error)
            }
        }
    }

    fn record_exception(&self, span: &mut S::Span, error: &ExecutionError) {
        span.set_status_error(error.to_string().into());
        span.record_exception(error);
        self.options.enrich_with_exception(span, error);
    }
}
