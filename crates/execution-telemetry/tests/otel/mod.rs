use grafbase_execution_telemetry::{
    span::{GRAPHQL_DOCUMENT_ATTRIBUTE, GRAPHQL_OPERATION_NAME_ATTRIBUTE, GRAPHQL_OPERATION_TYPE_ATTRIBUTE},
    ExecutionRequest, OtelSpanSource, TelemetryOptions, TelemetryProvider,
};
use opentelemetry::trace::{Status, TracerProvider as _};
use opentelemetry_sdk::{
    export::trace::SpanData,
    testing::trace::{InMemorySpanExporter, InMemorySpanExporterBuilder},
    trace::{Config, Sampler, TracerProvider},
};

use crate::common::{Outcome, Pipeline};

struct TestTracing {
    provider: TracerProvider,
    exporter: InMemorySpanExporter,
}

impl TestTracing {
    fn new(sampler: Sampler) -> Self {
        let exporter = InMemorySpanExporterBuilder::new().build();

        let provider = TracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .with_config(Config::default().with_sampler(sampler))
            .build();

        Self { provider, exporter }
    }

    fn telemetry(&self, options: TelemetryOptions) -> TelemetryProvider<OtelSpanSource<opentelemetry_sdk::trace::Tracer>> {
        TelemetryProvider::new(OtelSpanSource::new(self.provider.tracer("test")), options)
    }

    fn finished_spans(&self) -> Vec<SpanData> {
        let _ = self.provider.force_flush();
        self.exporter.get_finished_spans().unwrap()
    }
}

fn attribute(span: &SpanData, key: &str) -> Option<String> {
    span.attributes
        .iter()
        .find(|attribute| attribute.key.as_str() == key)
        .map(|attribute| attribute.value.as_str().into_owned())
}

#[tokio::test(flavor = "current_thread")]
async fn exported_span() {
    // prepare
    let tracing = TestTracing::new(Sampler::AlwaysOn);
    let telemetry = tracing.telemetry(TelemetryOptions::builder().record_document(true).build());
    let request = ExecutionRequest::new(r#"query GetUser { user(id: "42") { id } }"#);

    // act
    telemetry
        .execute(request, |request| Pipeline::data().run(request))
        .await
        .unwrap();

    // assert
    let spans = tracing.finished_spans();
    assert_eq!(spans.len(), 1);

    let span = &spans[0];
    assert_eq!(span.name, "query GetUser");
    assert_eq!(span.status, Status::Unset);
    assert_eq!(span.instrumentation_lib.name, "test");
    assert_eq!(attribute(span, GRAPHQL_OPERATION_TYPE_ATTRIBUTE).as_deref(), Some("query"));
    assert_eq!(attribute(span, GRAPHQL_OPERATION_NAME_ATTRIBUTE).as_deref(), Some("GetUser"));

    insta::assert_snapshot!(attribute(span, GRAPHQL_DOCUMENT_ATTRIBUTE).unwrap(), @r#"query GetUser { user(id: "") { id } }"#);
}

#[tokio::test(flavor = "current_thread")]
async fn exported_failure() {
    // prepare
    let tracing = TestTracing::new(Sampler::AlwaysOn);
    let telemetry = tracing.telemetry(TelemetryOptions::default());
    let request = ExecutionRequest::new("query GetUser { me { id } }");

    // act
    let result = telemetry
        .execute(request, |request| Pipeline::new(Outcome::Internal).run(request))
        .await;

    // assert
    assert!(result.is_err());

    let spans = tracing.finished_spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].status, Status::error("internal error: resolver panicked"));
}

#[tokio::test(flavor = "current_thread")]
async fn sampled_out_executions_are_not_traced() {
    // prepare
    let tracing = TestTracing::new(Sampler::AlwaysOff);
    let telemetry = tracing.telemetry(TelemetryOptions::default());
    let request = ExecutionRequest::new("query GetUser { me { id } }");

    // act
    let result = telemetry
        .execute(request, |request| {
            assert!(request.listeners.is_empty());
            Pipeline::data().run(request)
        })
        .await;

    // assert
    assert!(result.is_ok());
    assert!(tracing.finished_spans().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn global_source_without_an_installed_provider() {
    let telemetry = TelemetryProvider::new(OtelSpanSource::global(), TelemetryOptions::default());

    let result = telemetry
        .execute(ExecutionRequest::new("query GetUser { me { id } }"), |request| {
            assert!(request.listeners.is_empty());
            Pipeline::data().run(request)
        })
        .await;

    assert!(result.is_ok());
}
