//! Each phase of an execution has its own hook. The default implementations record the
//! standard attributes and then call the matching callback of [TelemetryOptions], so that
//! hosts can add their own attributes last. Implementors overriding a hook can still call the
//! `record_*` functions of this module to keep the standard behavior.
//!
//! The provider guarantees the ordering: request attributes before the pipeline starts,
//! operation attributes once validation completed, result attributes after the pipeline
//! returned and before the span ends.

use opentelemetry::KeyValue;

use crate::{
    options::TelemetryOptions,
    request::{ExecutionRequest, OperationType, ValidationContext},
    response::ExecutionResult,
    span::{
        TelemetrySpan, GRAPHQL_DOCUMENT_ATTRIBUTE, GRAPHQL_OPERATION_NAME_ATTRIBUTE, GRAPHQL_OPERATION_TYPE_ATTRIBUTE,
        GRAPHQL_RESPONSE_ERRORS_COUNT_ATTRIBUTE,
    },
};

/// Label recorded for an operation type we do not know about
pub const UNKNOWN_OPERATION_TYPE: &str = "unknown";

pub trait TelemetryHooks: Send + Sync + 'static {
    /// Before the pipeline starts.
    fn enrich_with_request(&self, span: &mut dyn TelemetrySpan, options: &TelemetryOptions, request: &ExecutionRequest) {
        record_request(span, options, request);
    }

    /// Once validation completed. Never called if no operation could be resolved.
    fn enrich_with_operation(
        &self,
        span: &mut dyn TelemetrySpan,
        options: &TelemetryOptions,
        request: &ExecutionRequest,
        context: &ValidationContext<'_>,
    ) {
        record_operation(span, options, request, context);
    }

    /// After the pipeline returned a result.
    fn enrich_with_result(
        &self,
        span: &mut dyn TelemetrySpan,
        options: &TelemetryOptions,
        request: &ExecutionRequest,
        result: &ExecutionResult,
    ) {
        record_result(span, options, request, result);
    }
}

/// Standard attributes only.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHooks;

impl TelemetryHooks for DefaultHooks {}

pub fn record_request(span: &mut dyn TelemetrySpan, options: &TelemetryOptions, request: &ExecutionRequest) {
    if let Some(name) = &request.operation_name {
        span.set_attribute(KeyValue::new(GRAPHQL_OPERATION_NAME_ATTRIBUTE, name.clone()));
    }

    if options.record_document() && span.is_all_data_requested() {
        if let Some(document) = options.sanitize_document(request).filter(|document| !document.is_empty()) {
            span.set_attribute(KeyValue::new(GRAPHQL_DOCUMENT_ATTRIBUTE, document));
        }
    }

    options.enrich_with_execution_options(span, request);
}

pub fn record_operation(
    span: &mut dyn TelemetrySpan,
    options: &TelemetryOptions,
    request: &ExecutionRequest,
    context: &ValidationContext<'_>,
) {
    let operation = &context.operation;
    let operation_type = operation_type_label(operation.ty());

    span.set_attribute(KeyValue::new(GRAPHQL_OPERATION_TYPE_ATTRIBUTE, operation_type));

    // The document may name an operation the client did not name in the request.
    match operation.name {
        Some(name) => {
            span.set_attribute(KeyValue::new(GRAPHQL_OPERATION_NAME_ATTRIBUTE, name.to_string()));
            span.set_display_name(format!("{operation_type} {name}").into());
        }
        None => span.set_display_name(operation_type.into()),
    }

    options.enrich_with_document(span, request, context.schema, context.document, operation);
}

pub fn record_result(
    span: &mut dyn TelemetrySpan,
    options: &TelemetryOptions,
    request: &ExecutionRequest,
    result: &ExecutionResult,
) {
    if result.has_errors() {
        span.set_attribute(KeyValue::new(
            GRAPHQL_RESPONSE_ERRORS_COUNT_ATTRIBUTE,
            result.errors.len() as i64,
        ));

        // Errors caused by the request itself, such as syntax errors, are not failures of ours.
        if let Some(error) = result.errors.iter().find(|error| error.is_unhandled()) {
            span.set_status_error(error.message.clone());
        }
    }

    options.enrich_with_execution_result(span, request, result);
}

#[allow(unreachable_patterns)]
pub fn operation_type_label(operation_type: OperationType) -> &'static str {
    match operation_type {
        OperationType::Query => "query",
        OperationType::Mutation => "mutation",
        OperationType::Subscription => "subscription",
        _ => UNKNOWN_OPERATION_TYPE,
    }
}
