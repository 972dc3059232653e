use std::fmt;

use async_graphql_parser::types::{ExecutableDocument, ServiceDocument};

use crate::{
    config::TelemetryConfig,
    error::ExecutionError,
    request::{ExecutionRequest, Operation},
    response::ExecutionResult,
    span::TelemetrySpan,
};

pub type RequestFilter = dyn Fn(&ExecutionRequest) -> bool + Send + Sync;
pub type DocumentSanitizer = dyn Fn(&ExecutionRequest) -> Option<String> + Send + Sync;
pub type ExecutionOptionsEnricher = dyn Fn(&mut dyn TelemetrySpan, &ExecutionRequest) + Send + Sync;
pub type DocumentEnricher = dyn Fn(&mut dyn TelemetrySpan, &ExecutionRequest, &ServiceDocument, &ExecutableDocument, &Operation<'_>)
    + Send
    + Sync;
pub type ExecutionResultEnricher = dyn Fn(&mut dyn TelemetrySpan, &ExecutionRequest, &ExecutionResult) + Send + Sync;
pub type ExceptionEnricher = dyn Fn(&mut dyn TelemetrySpan, &ExecutionError) + Send + Sync;

/// Decides which executions are traced and lets the host add its own attributes at each
/// phase. Immutable once built.
pub struct TelemetryOptions {
    filter: Box<RequestFilter>,
    record_document: bool,
    sanitize_document: Box<DocumentSanitizer>,
    execution_options_enricher: Option<Box<ExecutionOptionsEnricher>>,
    document_enricher: Option<Box<DocumentEnricher>>,
    execution_result_enricher: Option<Box<ExecutionResultEnricher>>,
    exception_enricher: Option<Box<ExceptionEnricher>>,
}

impl TelemetryOptions {
    pub fn builder() -> TelemetryOptionsBuilder {
        TelemetryOptionsBuilder::default()
    }

    /// Options filtering and recording as configured, with the default document sanitizer.
    pub fn from_config(config: &TelemetryConfig) -> Self {
        let filter_config = config.clone();

        Self::builder()
            .record_document(config.record_document)
            .filter(move |request| filter_config.traces_operation(request.operation_name.as_deref()))
            .build()
    }

    pub fn filter(&self, request: &ExecutionRequest) -> bool {
        (self.filter)(request)
    }

    pub fn record_document(&self) -> bool {
        self.record_document
    }

    pub fn sanitize_document(&self, request: &ExecutionRequest) -> Option<String> {
        (self.sanitize_document)(request)
    }

    pub fn enrich_with_execution_options(&self, span: &mut dyn TelemetrySpan, request: &ExecutionRequest) {
        if let Some(enrich) = &self.execution_options_enricher {
            enrich(span, request);
        }
    }

    pub fn enrich_with_document(
        &self,
        span: &mut dyn TelemetrySpan,
        request: &ExecutionRequest,
        schema: &ServiceDocument,
        document: &ExecutableDocument,
        operation: &Operation<'_>,
    ) {
        if let Some(enrich) = &self.document_enricher {
            enrich(span, request, schema, document, operation);
        }
    }

    pub fn enrich_with_execution_result(
        &self,
        span: &mut dyn TelemetrySpan,
        request: &ExecutionRequest,
        result: &ExecutionResult,
    ) {
        if let Some(enrich) = &self.execution_result_enricher {
            enrich(span, request, result);
        }
    }

    pub fn enrich_with_exception(&self, span: &mut dyn TelemetrySpan, error: &ExecutionError) {
        if let Some(enrich) = &self.exception_enricher {
            enrich(span, error);
        }
    }
}

impl Default for TelemetryOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for TelemetryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryOptions")
            .field("record_document", &self.record_document)
            .field("execution_options_enricher", &self.execution_options_enricher.is_some())
            .field("document_enricher", &self.document_enricher.is_some())
            .field("execution_result_enricher", &self.execution_result_enricher.is_some())
            .field("exception_enricher", &self.exception_enricher.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [TelemetryOptions]. Everything is traced and nothing extra is recorded unless
/// configured otherwise.
#[derive(Default)]
pub struct TelemetryOptionsBuilder {
    filter: Option<Box<RequestFilter>>,
    record_document: bool,
    sanitize_document: Option<Box<DocumentSanitizer>>,
    execution_options_enricher: Option<Box<ExecutionOptionsEnricher>>,
    document_enricher: Option<Box<DocumentEnricher>>,
    execution_result_enricher: Option<Box<ExecutionResultEnricher>>,
    exception_enricher: Option<Box<ExceptionEnricher>>,
}

impl TelemetryOptionsBuilder {
    /// Only requests for which `filter` returns `true` are traced.
    #[must_use]
    pub fn filter(mut self, filter: impl Fn(&ExecutionRequest) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    #[must_use]
    pub fn record_document(mut self, record_document: bool) -> Self {
        self.record_document = record_document;
        self
    }

    /// Replaces the default sanitizer. Returning `None` or an empty string keeps the document
    /// off the span.
    #[must_use]
    pub fn sanitize_document(
        mut self,
        sanitize: impl Fn(&ExecutionRequest) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.sanitize_document = Some(Box::new(sanitize));
        self
    }

    #[must_use]
    pub fn enrich_with_execution_options(
        mut self,
        enrich: impl Fn(&mut dyn TelemetrySpan, &ExecutionRequest) + Send + Sync + 'static,
    ) -> Self {
        self.execution_options_enricher = Some(Box::new(enrich));
        self
    }

    #[must_use]
    pub fn enrich_with_document(
        mut self,
        enrich: impl Fn(&mut dyn TelemetrySpan, &ExecutionRequest, &ServiceDocument, &ExecutableDocument, &Operation<'_>)
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.document_enricher = Some(Box::new(enrich));
        self
    }

    #[must_use]
    pub fn enrich_with_execution_result(
        mut self,
        enrich: impl Fn(&mut dyn TelemetrySpan, &ExecutionRequest, &ExecutionResult) + Send + Sync + 'static,
    ) -> Self {
        self.execution_result_enricher = Some(Box::new(enrich));
        self
    }

    #[must_use]
    pub fn enrich_with_exception(
        mut self,
        enrich: impl Fn(&mut dyn TelemetrySpan, &ExecutionError) + Send + Sync + 'static,
    ) -> Self {
        self.exception_enricher = Some(Box::new(enrich));
        self
    }

    pub fn build(self) -> TelemetryOptions {
        TelemetryOptions {
            filter: self.filter.unwrap_or_else(|| Box::new(|_: &ExecutionRequest| true)),
            record_document: self.record_document,
            sanitize_document: self
                .sanitize_document
                .unwrap_or_else(|| Box::new(crate::sanitize::sanitize_request)),
            execution_options_enricher: self.execution_options_enricher,
            document_enricher: self.document_enricher,
            execution_result_enricher: self.execution_result_enricher,
            exception_enricher: self.exception_enricher,
        }
    }
}
