use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    hooks::TelemetryHooks,
    options::TelemetryOptions,
    request::{ExecutionListener, ExecutionRequest, ValidationContext},
    span::{ActiveSpan, TelemetrySpan},
};

/// Records the operation on the execution span once validation completed.
///
/// Bound to a single request. Only the first notification is taken into account and
/// notifications arriving after the span ended are ignored.
pub struct OperationListener<S, H> {
    span: ActiveSpan<S>,
    options: Arc<TelemetryOptions>,
    hooks: Arc<H>,
    fired: AtomicBool,
}

impl<S, H> OperationListener<S, H> {
    pub(crate) fn new(span: ActiveSpan<S>, options: Arc<TelemetryOptions>, hooks: Arc<H>) -> Self {
        Self {
            span,
            options,
            hooks,
            fired: AtomicBool::new(false),
        }
    }
}

impl<S, H> ExecutionListener for OperationListener<S, H>
where
    S: TelemetrySpan,
    H: TelemetryHooks,
{
    fn validation_completed(&self, request: &ExecutionRequest, context: &ValidationContext<'_>) {
        if self.fired.swap(true, Ordering::AcqRel) {
            return;
        }

        self.span
            .with(|span| self.hooks.enrich_with_operation(span, &self.options, request, context));
    }
}
