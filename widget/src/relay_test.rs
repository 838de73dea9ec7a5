use super::*;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn upload() -> ImageUpload {
    ImageUpload { name: "err.png".into(), mime_type: "image/png".into(), bytes: vec![7; 64] }
}

// =========================================================================
// parse_process_image
// =========================================================================

#[test]
fn parse_success_returns_text() {
    let body = r#"{"error":false,"image":{"name":"err.png","size":64,"type":"image/png"},"aiResponse":"Clear the cache."}"#;
    assert_eq!(parse_process_image(200, body).unwrap(), QueryResponse::Text("Clear the cache.".into()));
}

#[test]
fn parse_blank_answer_is_empty_response() {
    let body = r#"{"error":false,"aiResponse":"   "}"#;
    assert_eq!(parse_process_image(200, body).unwrap_err(), QueryError::EmptyResponse);
    assert_eq!(parse_process_image(200, r#"{"error":false}"#).unwrap_err(), QueryError::EmptyResponse);
}

#[test]
fn parse_error_status_uses_relay_message() {
    let body = r#"{"error":true,"message":"No file uploaded"}"#;
    let err = parse_process_image(400, body).unwrap_err();
    assert_eq!(err, QueryError::Rejected { status: 400, message: "No file uploaded".into() });
}

#[test]
fn parse_error_status_with_plain_body() {
    let err = parse_process_image(502, "bad gateway\n").unwrap_err();
    assert_eq!(err, QueryError::Rejected { status: 502, message: "bad gateway".into() });
}

#[test]
fn parse_error_flag_on_success_status() {
    let err = parse_process_image(200, r#"{"error":true,"message":"nope"}"#).unwrap_err();
    assert!(matches!(err, QueryError::Rejected { status: 200, .. }));
}

#[test]
fn parse_garbage_is_malformed() {
    assert!(matches!(parse_process_image(200, "<html>"), Err(QueryError::MalformedResponse(_))));
}

// =========================================================================
// HTTP
// =========================================================================

#[test]
fn base_url_trailing_slash_trimmed() {
    let backend = RelayBackend::new("http://localhost:3000/").unwrap();
    assert_eq!(backend.base_url(), "http://localhost:3000");
}

#[tokio::test]
async fn image_query_posts_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-image"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": false,
            "image": { "name": "err.png", "size": 64, "type": "image/png" },
            "aiResponse": "BUG-1234 is resolved."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RelayBackend::new(&server.uri()).unwrap();
    let response = backend.image_query(&upload()).await.unwrap();
    assert_eq!(response, QueryResponse::Text("BUG-1234 is resolved.".into()));

    let received = &server.received_requests().await.unwrap()[0];
    let body = String::from_utf8_lossy(&received.body);
    assert!(body.contains(r#"name="image""#));
    assert!(body.contains(r#"filename="err.png""#));
}

#[tokio::test]
async fn image_query_maps_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-image"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": true,
            "message": "Failed to process image with AI"
        })))
        .mount(&server)
        .await;

    let backend = RelayBackend::new(&server.uri()).unwrap();
    let err = backend.image_query(&upload()).await.unwrap_err();
    assert_eq!(err, QueryError::Rejected { status: 500, message: "Failed to process image with AI".into() });
}

#[tokio::test]
async fn image_query_unreachable_is_transport_error() {
    let backend = RelayBackend::with_timeout("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let err = backend.image_query(&upload()).await.unwrap_err();
    assert!(matches!(err, QueryError::Transport(_)));
}

#[tokio::test]
async fn text_query_uses_fallback() {
    let backend = RelayBackend::new("http://127.0.0.1:1").unwrap().with_text_fallback(MockBackend::instant());
    let results = backend.text_query("disk full").await.unwrap();
    assert_eq!(results, crate::backend::mock_text_results());
}

#[tokio::test]
async fn ping_returns_liveness_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Image Processing API is running."))
        .mount(&server)
        .await;

    let backend = RelayBackend::new(&server.uri()).unwrap();
    assert_eq!(backend.ping().await.unwrap(), "Image Processing API is running.");
}

#[tokio::test]
async fn ping_non_200_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let backend = RelayBackend::new(&server.uri()).unwrap();
    assert!(matches!(backend.ping().await, Err(QueryError::Rejected { status: 503, .. })));
}
