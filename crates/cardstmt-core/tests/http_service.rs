//! Request/response contract tests against a mock parsing service.

use cardstmt_core::models::config::ServiceConfig;
use cardstmt_core::{
    HttpParseService, InMemoryFile, ParseService, ServiceError, WorkflowController, WorkflowState,
    shape_record,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> HttpParseService {
    let config = ServiceConfig {
        endpoint: format!("{}/parse", server.uri()),
        ..ServiceConfig::default()
    };
    HttpParseService::new(&config).unwrap()
}

fn statement() -> InMemoryFile {
    InMemoryFile::new("march.pdf", "application/pdf", b"%PDF-1.7 statement".to_vec())
}

#[tokio::test]
async fn test_uploads_single_multipart_file_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains(r#"name="file"; filename="march.pdf""#))
        .and(body_string_contains("%PDF-1.7 statement"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"issuer": "Chase", "total_due": "123.45"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let record = service_for(&server).parse(&statement()).await.unwrap();
    let rows: Vec<(String, String)> = shape_record(&record)
        .into_iter()
        .map(|f| (f.label, f.value))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Card Issuer".to_string(), "Chase".to_string()),
            ("Total Amount Due".to_string(), "123.45".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_rejection_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "Unsupported document"})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut controller = WorkflowController::new();
    controller.select_from_picker(vec![statement()]).unwrap();

    let state = controller.trigger_parse(&service).await;
    assert_eq!(state, &WorkflowState::Failed("Unsupported document".to_string()));
}

#[tokio::test]
async fn test_unparseable_error_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut controller = WorkflowController::new();
    controller.select_from_picker(vec![statement()]).unwrap();

    let state = controller.trigger_parse(&service).await;
    assert_eq!(state, &WorkflowState::Failed("Server error.".to_string()));
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let error = service_for(&server).parse(&statement()).await.unwrap_err();
    assert!(matches!(error, ServiceError::MalformedResponse(_)));
    assert_eq!(error.user_message(), "An unexpected error occurred.");
}

#[tokio::test]
async fn test_transport_failure_resolves_to_failed() {
    // Nothing listens on the discard port.
    let config = ServiceConfig {
        endpoint: "http://127.0.0.1:9/parse".to_string(),
        timeout_secs: 5,
        ..ServiceConfig::default()
    };
    let service = HttpParseService::new(&config).unwrap();
    let mut controller = WorkflowController::new();
    controller.select_from_picker(vec![statement()]).unwrap();

    let state = controller.trigger_parse(&service).await;
    assert_eq!(
        state,
        &WorkflowState::Failed("An unexpected error occurred.".to_string())
    );
}

#[tokio::test]
async fn test_no_file_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut controller: WorkflowController<InMemoryFile> = WorkflowController::new();
    let state = controller.trigger_parse(&service).await;
    assert_eq!(state, &WorkflowState::Failed("Please select a file first.".to_string()));
}
