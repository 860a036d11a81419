//! Patient routes, shared by the admin and radiographer sections.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use super::auth::ConsoleSession;
use super::radiographs::{self, RadiographView};
use super::uploads::collect_uploads;
use super::{api_failure, list_page, notice};
use crate::api::ApiError;
use crate::api::types::{AccountDraft, Patient};
use crate::services::listing::{ListPage, ListQuery};
use crate::state::AppState;

const FETCH_FAILED: &str = "Failed to fetch patients";
const DETAIL_FAILED: &str = "Failed to fetch patient details";
const ADD_FAILED: &str = "Failed to add patient";
const UPDATE_FAILED: &str = "Failed to update patient";
const DELETE_FAILED: &str = "Failed to delete patient";
const ENROLL_FAILED: &str = "Failed to upload fingerprint.";
const SCAN_FAILED: &str = "Failed to fetch user data";

/// Patient plus its image links resolved against the records API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientView {
    #[serde(flatten)]
    pub patient: Patient,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id_href: Option<String>,
}

impl PatientView {
    pub(crate) fn resolve(state: &AppState, patient: Patient) -> Self {
        let profile_href = radiographs::href(state, patient.profile_url.as_deref());
        let national_id_href = radiographs::href(state, patient.national_id_url.as_deref());
        Self { patient, profile_href, national_id_href }
    }
}

#[derive(Debug, Serialize)]
pub struct PatientDetail {
    pub patient: PatientView,
    pub radiographs: Vec<RadiographView>,
}

/// `GET /{section}/patients`: filtered patient table.
pub async fn list(
    State(state): State<AppState>,
    session: ConsoleSession,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPage<Patient>>, Response> {
    list_page(state.records.patients(&session.token).await, &query, FETCH_FAILED)
}

/// `POST /{section}/patients`
pub async fn create(
    State(state): State<AppState>,
    session: ConsoleSession,
    Json(body): Json<AccountDraft<Patient>>,
) -> Response {
    match state.records.create_patient(&session.token, &body).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => api_failure(e, ADD_FAILED),
    }
}

/// `GET /{section}/patients/{id}`: profile card plus the patient's radiographs.
pub async fn detail(
    State(state): State<AppState>,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<Json<PatientDetail>, Response> {
    let patient = state
        .records
        .patient(&session.token, &id)
        .await
        .map_err(|e| api_failure(e, DETAIL_FAILED))?;
    let radiographs = state
        .records
        .radiographs_for_patient(&session.token, &id)
        .await
        .map_err(|e| api_failure(e, radiographs::FETCH_FAILED))?;

    Ok(Json(PatientDetail {
        patient: PatientView::resolve(&state, patient),
        radiographs: radiographs::resolve_all(&state, radiographs),
    }))
}

/// `PUT /{section}/patients/{id}`
pub async fn update(
    State(state): State<AppState>,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(body): Json<AccountDraft<Patient>>,
) -> Response {
    match state.records.update_patient(&session.token, &id, &body).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => api_failure(e, UPDATE_FAILED),
    }
}

/// `DELETE /{section}/patients/{id}`
pub async fn remove(State(state): State<AppState>, session: ConsoleSession, Path(id): Path<String>) -> Response {
    match state.records.delete_patient(&session.token, &id).await {
        Ok(()) => notice("Patient deleted successfully").into_response(),
        Err(e) => api_failure(e, DELETE_FAILED),
    }
}

/// `POST /hospital/patients/{id}/fingerprints`: multipart `files`.
pub async fn enroll_fingerprints(
    State(state): State<AppState>,
    session: ConsoleSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let files = match collect_uploads(multipart, "files").await {
        Ok(files) if !files.is_empty() => files,
        Ok(_) => return api_failure(ApiError::Upload("Please select fingerprint files to upload.".into()), ENROLL_FAILED),
        Err(e) => return api_failure(e, ENROLL_FAILED),
    };
    let count = files.len();
    match state.records.add_fingerprints(&session.token, &id, files).await {
        Ok(()) => {
            tracing::info!(patient = %id, count, "fingerprints enrolled");
            notice("Fingerprint(s) uploaded successfully.").into_response()
        }
        Err(e) => api_failure(e, ENROLL_FAILED),
    }
}

/// `POST /radiographer/patients/scan`: identify a patient from one
/// fingerprint image (multipart `file`).
pub async fn scan_fingerprint(State(state): State<AppState>, session: ConsoleSession, multipart: Multipart) -> Response {
    let scan = match collect_uploads(multipart, "file").await {
        Ok(mut files) if !files.is_empty() => files.swap_remove(0),
        Ok(_) => return api_failure(ApiError::Upload("Please select a fingerprint image.".into()), SCAN_FAILED),
        Err(e) => return api_failure(e, SCAN_FAILED),
    };
    match state.records.patient_by_fingerprint(&session.token, scan).await {
        Ok(patient) => Json(PatientView::resolve(&state, patient)).into_response(),
        Err(e) => api_failure(e, SCAN_FAILED),
    }
}

#[cfg(test)]
#[path = "patients_test.rs"]
mod tests;
