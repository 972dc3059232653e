use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use ::tower::{Layer, Service};

use crate::{
    error::ExecutionError,
    hooks::{DefaultHooks, TelemetryHooks},
    provider::TelemetryProvider,
    request::ExecutionRequest,
    response::ExecutionResult,
    span::SpanSource,
};

/// Traces every execution going through the wrapped pipeline service.
pub struct TelemetryLayer<S, H = DefaultHooks> {
    provider: Arc<TelemetryProvider<S, H>>,
}

impl<S, H> TelemetryLayer<S, H> {
    pub fn new(provider: impl Into<Arc<TelemetryProvider<S, H>>>) -> Self {
        Self {
            provider: provider.into(),
        }
    }
}

impl<S, H> Clone for TelemetryLayer<S, H> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

impl<Inner, S, H> Layer<Inner> for TelemetryLayer<S, H> {
    type Service = TelemetryService<Inner, S, H>;

    fn layer(&self, inner: Inner) -> Self::Service {
        TelemetryService {
            inner,
            provider: self.provider.clone(),
        }
    }
}

/// See [TelemetryLayer]. The inner service is the continuation of the pipeline.
pub struct TelemetryService<Inner, S, H = DefaultHooks> {
    inner: Inner,
    provider: Arc<TelemetryProvider<S, H>>,
}

impl<Inner: Clone, S, H> Clone for TelemetryService<Inner, S, H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            provider: self.provider.clone(),
        }
    }
}

impl<Inner, S, H> Service<ExecutionRequest> for TelemetryService<Inner, S, H>
where
    Inner: Service<ExecutionRequest, Response = ExecutionResult, Error = ExecutionError> + Clone + Send + 'static,
    Inner::Future: Send + 'static,
    S: SpanSource,
    H: TelemetryHooks,
{
    type Response = ExecutionResult;
    type Error = ExecutionError;
    type Future = Pin<Box<dyn Future<Output = Result<ExecutionResult, ExecutionError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: ExecutionRequest) -> Self::Future {
        // The clone is not ready, the ready one is taken instead.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let provider = self.provider.clone();

        Box::pin(async move { provider.execute(request, move |request| inner.call(request)).await })
    }
}
