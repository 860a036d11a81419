use super::*;
use crate::state::test_helpers::{MockRecords, TEST_RECORDS_URL, json_body, test_app_state, test_session};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

fn physician_session() -> ConsoleSession {
    ConsoleSession { token: "jwt-doc".into(), username: Some("doc@clinic.org".into()), role: Some(Role::Physician) }
}

// =============================================================================
// hospital / radiographer
// =============================================================================

#[tokio::test]
async fn hospital_card_carries_username() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({ "id": 3, "name": "St Mary", "phoneNumber": "0712345678" }));
    let Json(page) = hospital(State(test_app_state(&mock)), test_session()).await.unwrap();

    assert_eq!(page.username.as_deref(), Some("ada@clinic.org"));
    assert_eq!(page.hospital.name.as_deref(), Some("St Mary"));
    let sent = mock.requests();
    assert_eq!(sent[0].path, "/hospital/get-by-admin");
    assert_eq!(sent[0].token.as_deref(), Some("jwt"));
}

#[tokio::test]
async fn hospital_failure_uses_fallback() {
    let mock = Arc::new(MockRecords::new());
    mock.respond_raw(500, Vec::new());
    let err = hospital(State(test_app_state(&mock)), test_session()).await.unwrap_err();

    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(err).await["error"], "Failed to fetch hospital");
}

#[tokio::test]
async fn radiographer_page_shows_own_profile() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({ "id": 5, "firstname": "Marie", "department": "CT", "password": "$2a$10$hash" }));
    let Json(page) = radiographer(State(test_app_state(&mock)), test_session()).await.unwrap();

    assert_eq!(page.profile.department.as_deref(), Some("CT"));
    assert_eq!(mock.requests()[0].path, "/radiographer/profile");
    let json = serde_json::to_value(&page).unwrap();
    assert!(json["profile"].get("password").is_none());
}

// =============================================================================
// patient
// =============================================================================

#[tokio::test]
async fn patient_page_joins_profile_and_radiographs() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({ "id": 7, "firstname": "Ada", "profileUrl": "profiles/7.png" }));
    mock.respond(200, json!([{ "id": 70, "name": "Chest", "imageUrl": "/scans/70.png" }]));
    let Json(page) = patient(State(test_app_state(&mock)), test_session()).await.unwrap();

    assert_eq!(page.profile.profile_href, Some(format!("{TEST_RECORDS_URL}/profiles/7.png")));
    assert_eq!(page.radiographs.len(), 1);
    assert_eq!(page.radiographs[0].image_href, Some(format!("{TEST_RECORDS_URL}/scans/70.png")));

    let sent = mock.requests();
    assert_eq!(sent[0].path, "/patient/profile");
    assert_eq!(sent[1].path, "/radiograph/get-by-patient/7");
}

#[tokio::test]
async fn patient_profile_without_id_skips_radiographs() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({ "firstname": "Ada" }));
    let Json(page) = patient(State(test_app_state(&mock)), test_session()).await.unwrap();

    assert!(page.radiographs.is_empty());
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn patient_radiograph_failure_surfaces_server_message() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(200, json!({ "id": 7 }));
    mock.respond(403, json!({ "message": "Not your record" }));
    let err = patient(State(test_app_state(&mock)), test_session()).await.unwrap_err();

    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(err).await["error"], "Not your record");
}

// =============================================================================
// physician
// =============================================================================

#[tokio::test]
async fn physician_page_summarizes_session_and_filters_patients() {
    let mock = Arc::new(MockRecords::new());
    mock.respond(
        200,
        json!([
            { "id": 1, "firstname": "Ada", "gender": "FEMALE" },
            { "id": 2, "firstname": "Alan", "gender": "MALE", "accountLocked": true }
        ]),
    );
    let query = ListQuery { search: Some("ala".into()), ..ListQuery::default() };
    let Json(page) = physician(State(test_app_state(&mock)), physician_session(), Query(query)).await.unwrap();

    assert_eq!(page.username.as_deref(), Some("doc@clinic.org"));
    assert_eq!(page.patients.rows.len(), 1);
    assert_eq!(page.patients.stats.male, 1);
    assert_eq!(page.patients.stats.locked, 1);

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["role"], "PHYSICIAN");
    assert_eq!(mock.requests()[0].token.as_deref(), Some("jwt-doc"));
}

#[tokio::test]
async fn physician_page_failure_uses_fallback() {
    let mock = Arc::new(MockRecords::new());
    mock.fail_network();
    let err = physician(State(test_app_state(&mock)), physician_session(), Query(ListQuery::default()))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json_body(err).await["error"], "Network error. Please try again later.");
}
