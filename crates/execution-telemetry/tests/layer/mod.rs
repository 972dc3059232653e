use std::sync::Arc;

use grafbase_execution_telemetry::{
    span::GRAPHQL_OPERATION_TYPE_ATTRIBUTE, tower::TelemetryLayer, ExecutionRequest, TelemetryOptions,
    TelemetryProvider,
};
use tower::{ServiceBuilder, ServiceExt};

use crate::common::{Outcome, Pipeline, RecordingSpanSource};

#[tokio::test(flavor = "current_thread")]
async fn pipeline_service_is_traced() {
    // prepare
    let source = RecordingSpanSource::default();
    let provider = TelemetryProvider::new(source.clone(), TelemetryOptions::default());

    let service = ServiceBuilder::new()
        .layer(TelemetryLayer::new(provider))
        .service(tower::service_fn(|request| Pipeline::data().run(request)));

    // act
    let result = service
        .oneshot(ExecutionRequest::new("mutation CreateUser { createUser(name: \"Jane\") { id } }"))
        .await
        .unwrap();

    // assert
    insta::assert_json_snapshot!(result, @r###"
    {
      "data": {
        "user": {
          "id": "1"
        }
      }
    }
    "###);

    let span = source.single_span();
    assert_eq!(span.name, "mutation CreateUser");
    assert_eq!(span.attribute(GRAPHQL_OPERATION_TYPE_ATTRIBUTE), Some("mutation"));
    assert_eq!(span.end_count, 1);
}

#[tokio::test(flavor = "current_thread")]
async fn provider_is_shared_between_services() {
    // prepare
    let source = RecordingSpanSource::default();
    let layer = TelemetryLayer::new(Arc::new(TelemetryProvider::new(
        source.clone(),
        TelemetryOptions::default(),
    )));

    let data = ServiceBuilder::new()
        .layer(layer.clone())
        .service(tower::service_fn(|request| Pipeline::data().run(request)));

    let failing = ServiceBuilder::new()
        .layer(layer)
        .service(tower::service_fn(|request| Pipeline::new(Outcome::Internal).run(request)));

    // act
    let ok = data.oneshot(ExecutionRequest::new("query First { me { id } }")).await;
    let error = failing.oneshot(ExecutionRequest::new("query Second { me { id } }")).await;

    // assert
    assert!(ok.is_ok());
    assert!(error.is_err());

    let spans = source.spans();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].name, "query First");
    assert!(!spans[0].is_error());
    assert_eq!(spans[1].name, "query Second");
    assert!(spans[1].is_error());
}
