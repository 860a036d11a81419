use super::*;
use crate::api::Payload;
use crate::state::test_helpers::{
    MockRecords, TEST_RECORDS_URL, json_body, multipart, test_app_state, test_session as session,
};
use serde_json::json;
use std::sync::Arc;

// =============================================================================
// list / detail
// =============================================================================

#[tokio::test]
async fn list_filters_rows_and_counts_stats() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(
        200,
        json!([
            { "id": 1, "firstname": "Ada", "gender": "FEMALE", "dateOfBirth": "1990-04-01" },
            { "id": 2, "firstname": "Alan", "gender": "MALE", "dateOfBirth": "1985-06-23" },
            { "id": 3, "firstname": "Grace", "gender": "FEMALE", "accountLocked": true }
        ]),
    );
    let query = ListQuery { gender: Some("FEMALE".into()), ..ListQuery::default() };
    let Json(page) = list(State(test_app_state(&mock)), session(), Query(query)).await.unwrap();

    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.stats.total, 2);
    assert_eq!(page.stats.female, 2);
    assert_eq!(page.stats.locked, 1);
    assert_eq!(mock.requests()[0].path, "/patient");
}

#[tokio::test]
async fn detail_resolves_image_links() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({ "id": 7, "firstname": "Ada", "profileUrl": "/profiles/7.png" }));
    mock.respond(200, json!([{ "id": 70, "name": "Chest", "imageUrl": "scans/70.png" }, { "id": 71 }]));
    let Json(view) = detail(State(test_app_state(&mock)), session(), Path("7".into())).await.unwrap();

    assert_eq!(
        view.patient.profile_href.as_deref(),
        Some(format!("{TEST_RECORDS_URL}/profiles/7.png").as_str())
    );
    assert_eq!(
        view.radiographs[0].image_href.as_deref(),
        Some(format!("{TEST_RECORDS_URL}/scans/70.png").as_str())
    );
    assert!(view.radiographs[1].image_href.is_none());

    let sent = mock.requests();
    assert_eq!(sent[0].path, "/patient/7");
    assert_eq!(sent[1].path, "/radiograph/get-by-patient/7");
}

#[tokio::test]
async fn detail_failure_uses_fallback() {
    let mock = Arc::new(MockRecords::new());
    mock.respond_raw(404, Vec::new());
    let err = detail(State(test_app_state(&mock)), session(), Path("7".into())).await.unwrap_err();

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(err).await["error"], DETAIL_FAILED);
}

// =============================================================================
// create / remove
// =============================================================================

#[tokio::test]
async fn create_returns_created_record() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(201, json!({ "id": 9, "firstname": "Ada" }));
    let body: AccountDraft<Patient> =
        serde_json::from_value(json!({ "firstname": "Ada", "password": "first-pw" })).unwrap();
    let resp = create(State(test_app_state(&mock)), session(), Json(body)).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(json_body(resp).await["id"], 9);
    assert_eq!(
        mock.requests()[0].payload,
        Payload::Json(json!({ "firstname": "Ada", "password": "first-pw" }))
    );
}

#[tokio::test]
async fn update_without_lock_flag_leaves_lock_alone() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({ "id": 7, "firstname": "Ada", "accountLocked": true }));
    let body: AccountDraft<Patient> = serde_json::from_value(json!({ "firstname": "Ada" })).unwrap();
    let resp = update(State(test_app_state(&mock)), session(), Path("7".into()), Json(body)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let sent = mock.requests();
    assert_eq!(sent[0].method, reqwest::Method::PUT);
    assert_eq!(sent[0].path, "/patient/7");
    assert_eq!(sent[0].payload, Payload::Json(json!({ "firstname": "Ada" })));
}

// =============================================================================
// password never leaves the console
// =============================================================================

#[tokio::test]
async fn list_and_detail_never_echo_passwords() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!([{ "id": 1, "firstname": "Ada", "password": "$2a$10$hash" }]));
    mock.respond(200, json!({ "id": 1, "firstname": "Ada", "password": "$2a$10$hash" }));
    mock.respond(200, json!([]));
    let state = test_app_state(&mock);

    let Json(page) = list(State(state.clone()), session(), Query(ListQuery::default())).await.unwrap();
    let page = serde_json::to_value(&page).unwrap();
    assert_eq!(page["rows"][0]["firstname"], "Ada");
    assert!(page["rows"][0].get("password").is_none());

    let Json(view) = detail(State(state), session(), Path("1".into())).await.unwrap();
    let view = serde_json::to_value(&view).unwrap();
    assert_eq!(view["patient"]["firstname"], "Ada");
    assert!(view["patient"].get("password").is_none());
}

#[tokio::test]
async fn remove_confirms_deletion() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({}));
    let resp = remove(State(test_app_state(&mock)), session(), Path("7".into())).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["message"], "Patient deleted successfully");
    assert_eq!(mock.requests()[0].method, reqwest::Method::DELETE);
}

// =============================================================================
// fingerprints
// =============================================================================

#[tokio::test]
async fn enroll_forwards_every_file_part() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({}));
    let form = multipart(&[("files", "left.png", "left"), ("files", "right.png", "right"), ("note", "x.txt", "x")]).await;
    let resp = enroll_fingerprints(State(test_app_state(&mock)), session(), Path("7".into()), form).await;

    assert_eq!(json_body(resp).await["message"], "Fingerprint(s) uploaded successfully.");
    let sent = mock.requests();
    assert_eq!(sent[0].path, "/patient/add-fingerprint");
    assert_eq!(sent[0].query, vec![("userId", "7".to_owned())]);
    let Payload::Files { field, files } = &sent[0].payload else {
        panic!("expected multipart payload");
    };
    assert_eq!(*field, "files");
    let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, ["left.png", "right.png"]);
}

#[tokio::test]
async fn enroll_without_files_is_rejected_locally() {
    let mock = Arc::new(MockRecords::new());
    let form = multipart(&[("files", "empty.png", "")]).await;
    let resp = enroll_fingerprints(State(test_app_state(&mock)), session(), Path("7".into()), form).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "Please select fingerprint files to upload.");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn scan_returns_matched_patient() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({ "id": 7, "firstname": "Ada", "nationalIdUrl": "ids/7.png" }));
    let form = multipart(&[("file", "scan.png", "ridge")]).await;
    let resp = scan_fingerprint(State(test_app_state(&mock)), session(), form).await;

    let body = json_body(resp).await;
    assert_eq!(body["firstname"], "Ada");
    assert_eq!(body["nationalIdHref"], format!("{TEST_RECORDS_URL}/ids/7.png"));
    assert_eq!(mock.requests()[0].path, "/patient/get-by-fingerprint");
}

#[tokio::test]
async fn scan_miss_surfaces_server_message() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(404, json!({ "message": "No matching fingerprint" }));
    let form = multipart(&[("file", "scan.png", "ridge")]).await;
    let resp = scan_fingerprint(State(test_app_state(&mock)), session(), form).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "No matching fingerprint");
}
