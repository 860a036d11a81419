use super::*;
use crate::api::Payload;
use crate::state::test_helpers::{MockRecords, TEST_RECORDS_URL, json_body, multipart, test_app_state, test_session};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn collect_uploads_keeps_named_non_empty_parts() {
    let form = multipart(&[("file", "a.pdf", "%PDF"), ("file", "blank.pdf", ""), ("other", "b.pdf", "x")]).await;
    let uploads = collect_uploads(form, "file").await.unwrap();

    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].file_name, "a.pdf");
    assert_eq!(uploads[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(uploads[0].bytes, b"%PDF");
}

#[tokio::test]
async fn upload_returns_location_and_absolute_url() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({ "location": "/documents/abc.png" }));
    let form = multipart(&[("file", "scan.png", "pixels")]).await;
    let resp = upload_document(State(test_app_state(&mock)), test_session(), form).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["location"], "/documents/abc.png");
    assert_eq!(body["url"], format!("{TEST_RECORDS_URL}/documents/abc.png"));

    let sent = mock.requests();
    assert_eq!(sent[0].path, "/documents/upload");
    assert_eq!(sent[0].token.as_deref(), Some("jwt"));
    let Payload::Files { field, files } = &sent[0].payload else {
        panic!("expected multipart payload");
    };
    assert_eq!(*field, "file");
    assert_eq!(files[0].file_name, "scan.png");
}

#[tokio::test]
async fn upload_without_file_is_rejected_locally() {
    let mock = Arc::new(MockRecords::new());
    let form = multipart(&[("file", "empty.png", "")]).await;
    let resp = upload_document(State(test_app_state(&mock)), test_session(), form).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "Please select a file to upload.");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn upload_rejection_surfaces_server_message() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(413, json!({ "message": "File too large" }));
    let form = multipart(&[("file", "scan.png", "pixels")]).await;
    let resp = upload_document(State(test_app_state(&mock)), test_session(), form).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json_body(resp).await["error"], "File too large");
}
