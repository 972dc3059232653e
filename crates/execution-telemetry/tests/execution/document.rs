use grafbase_execution_telemetry::{span::GRAPHQL_DOCUMENT_ATTRIBUTE, ExecutionRequest, TelemetryOptions, TelemetryProvider};

use crate::common::{Pipeline, RecordingSpanSource};

const QUERY: &str = r#"query GetUser { user(id: "secret-id") { id name } }"#;

async fn recorded_document(source: RecordingSpanSource, options: TelemetryOptions) -> Option<String> {
    let provider = TelemetryProvider::new(source.clone(), options);

    provider
        .execute(ExecutionRequest::new(QUERY), |request| Pipeline::data().run(request))
        .await
        .unwrap();

    source.single_span().attribute(GRAPHQL_DOCUMENT_ATTRIBUTE).map(str::to_string)
}

#[tokio::test(flavor = "current_thread")]
async fn not_recorded_by_default() {
    let document = recorded_document(RecordingSpanSource::default(), TelemetryOptions::default()).await;

    assert_eq!(document, None);
}

#[tokio::test(flavor = "current_thread")]
async fn recorded_sanitized() {
    let options = TelemetryOptions::builder().record_document(true).build();

    let document = recorded_document(RecordingSpanSource::default(), options).await;

    insta::assert_snapshot!(document.unwrap(), @r#"query GetUser { user(id: "") { id name } }"#);
}

#[tokio::test(flavor = "current_thread")]
async fn not_recorded_when_the_backend_does_not_request_all_data() {
    let options = TelemetryOptions::builder().record_document(true).build();

    let document = recorded_document(RecordingSpanSource::without_all_data(), options).await;

    assert_eq!(document, None);
}

#[tokio::test(flavor = "current_thread")]
async fn custom_sanitizer() {
    let options = TelemetryOptions::builder()
        .record_document(true)
        .sanitize_document(|request| Some(request.document.to_uppercase()))
        .build();

    let document = recorded_document(RecordingSpanSource::default(), options).await;

    insta::assert_snapshot!(document.unwrap(), @r#"QUERY GETUSER { USER(ID: "SECRET-ID") { ID NAME } }"#);
}

#[tokio::test(flavor = "current_thread")]
async fn sanitizer_redacting_everything() {
    let options = TelemetryOptions::builder()
        .record_document(true)
        .sanitize_document(|_| None)
        .build();

    let document = recorded_document(RecordingSpanSource::default(), options).await;

    assert_eq!(document, None);
}

#[tokio::test(flavor = "current_thread")]
async fn sanitizer_returning_an_empty_document() {
    let options = TelemetryOptions::builder()
        .record_document(true)
        .sanitize_document(|_| Some(String::new()))
        .build();

    let document = recorded_document(RecordingSpanSource::default(), options).await;

    assert_eq!(document, None);
}

#[tokio::test(flavor = "current_thread")]
async fn sanitizer_is_not_called_when_recording_is_disabled() {
    let options = TelemetryOptions::builder()
        .sanitize_document(|_| unreachable!("the document is not recorded"))
        .build();

    let document = recorded_document(RecordingSpanSource::default(), options).await;

    assert_eq!(document, None);
}
