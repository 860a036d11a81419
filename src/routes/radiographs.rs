//! Radiograph routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use super::auth::ConsoleSession;
use super::{api_failure, notice};
use crate::api::types::{Radiograph, RecordId};
use crate::state::AppState;

pub(crate) const FETCH_FAILED: &str = "Failed to fetch radiographs";
const ADD_FAILED: &str = "Failed to add radiograph";
const UPDATE_FAILED: &str = "Failed to update radiograph";
const DELETE_FAILED: &str = "Failed to delete radiograph";
const PROFILE_FAILED: &str = "Failed to fetch profile";

/// Radiograph with its image link resolved against the records API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiographView {
    #[serde(flatten)]
    pub radiograph: Radiograph,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_href: Option<String>,
}

/// Absolute link for a stored path; absent or blank paths have none.
pub(crate) fn href(state: &AppState, storage_path: Option<&str>) -> Option<String> {
    storage_path
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(|path| state.config.asset_url(path))
}

pub(crate) fn resolve_all(state: &AppState, radiographs: Vec<Radiograph>) -> Vec<RadiographView> {
    radiographs
        .into_iter()
        .map(|radiograph| {
            let image_href = href(state, radiograph.image_url.as_deref());
            RadiographView { radiograph, image_href }
        })
        .collect()
}

/// `GET /hospital/patients/{id}/radiographs`
pub async fn list_for_patient(
    State(state): State<AppState>,
    session: ConsoleSession,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<RadiographView>>, Response> {
    let radiographs = state
        .records
        .radiographs_for_patient(&session.token, &patient_id)
        .await
        .map_err(|e| api_failure(e, FETCH_FAILED))?;
    Ok(Json(resolve_all(&state, radiographs)))
}

/// `POST /hospital/patients/{id}/radiographs`
pub async fn create_for_patient(
    State(state): State<AppState>,
    session: ConsoleSession,
    Path(patient_id): Path<String>,
    Json(body): Json<Radiograph>,
) -> Response {
    match state.records.create_radiograph(&session.token, &patient_id, &body).await {
        Ok(created) => {
            tracing::info!(patient = %patient_id, "radiograph added");
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => api_failure(e, ADD_FAILED),
    }
}

/// `PUT /hospital/radiographs/{id}`
pub async fn update(
    State(state): State<AppState>,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(body): Json<Radiograph>,
) -> Response {
    match state.records.update_radiograph(&session.token, &id, &body).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => api_failure(e, UPDATE_FAILED),
    }
}

/// `DELETE /{section}/radiographs/{id}`
pub async fn remove(State(state): State<AppState>, session: ConsoleSession, Path(id): Path<String>) -> Response {
    match state.records.delete_radiograph(&session.token, &id).await {
        Ok(()) => notice("Radiograph deleted successfully").into_response(),
        Err(e) => api_failure(e, DELETE_FAILED),
    }
}

/// `GET /patient/reports`: the signed-in patient's own radiographs.
pub async fn own_reports(
    State(state): State<AppState>,
    session: ConsoleSession,
) -> Result<Json<Vec<RadiographView>>, Response> {
    let profile = state
        .records
        .patient_profile(&session.token)
        .await
        .map_err(|e| api_failure(e, PROFILE_FAILED))?;
    let Some(id) = profile.id.as_ref().map(RecordId::to_string) else {
        return Ok(Json(Vec::new()));
    };
    let radiographs = state
        .records
        .radiographs_for_patient(&session.token, &id)
        .await
        .map_err(|e| api_failure(e, FETCH_FAILED))?;
    Ok(Json(resolve_all(&state, radiographs)))
}

#[cfg(test)]
#[path = "radiographs_test.rs"]
mod tests;
