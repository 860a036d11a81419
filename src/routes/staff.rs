//! Hospital staff routes: radiographers and physicians.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use super::auth::ConsoleSession;
use super::{api_failure, list_page, notice};
use crate::api::types::{AccountDraft, Physician, Radiographer};
use crate::services::listing::{ListPage, ListQuery};
use crate::state::AppState;

// =============================================================================
// RADIOGRAPHERS
// =============================================================================

/// `GET /hospital/radiographers`
pub async fn list_radiographers(
    State(state): State<AppState>,
    session: ConsoleSession,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPage<Radiographer>>, Response> {
    list_page(
        state.records.radiographers(&session.token).await,
        &query,
        "Failed to fetch radiographers",
    )
}

/// `POST /hospital/radiographers`
pub async fn create_radiographer(
    State(state): State<AppState>,
    session: ConsoleSession,
    Json(body): Json<AccountDraft<Radiographer>>,
) -> Response {
    match state.records.create_radiographer(&session.token, &body).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => api_failure(e, "Failed to add radiographer"),
    }
}

/// `PUT /hospital/radiographers/{id}`
pub async fn update_radiographer(
    State(state): State<AppState>,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(body): Json<AccountDraft<Radiographer>>,
) -> Response {
    match state.records.update_radiographer(&session.token, &id, &body).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => api_failure(e, "Failed to update radiographer"),
    }
}

/// `DELETE /hospital/radiographers/{id}`
pub async fn remove_radiographer(
    State(state): State<AppState>,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Response {
    match state.records.delete_radiographer(&session.token, &id).await {
        Ok(()) => notice("Radiographer deleted successfully").into_response(),
        Err(e) => api_failure(e, "Failed to delete radiographer"),
    }
}

// =============================================================================
// PHYSICIANS
// =============================================================================

/// `GET /hospital/physicians`
pub async fn list_physicians(
    State(state): State<AppState>,
    session: ConsoleSession,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPage<Physician>>, Response> {
    list_page(state.records.physicians(&session.token).await, &query, "Failed to fetch physicians")
}

/// `POST /hospital/physicians`
pub async fn create_physician(
    State(state): State<AppState>,
    session: ConsoleSession,
    Json(body): Json<AccountDraft<Physician>>,
) -> Response {
    match state.records.create_physician(&session.token, &body).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => api_failure(e, "Failed to add physician"),
    }
}

/// `PUT /hospital/physicians/{id}`
pub async fn update_physician(
    State(state): State<AppState>,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(body): Json<AccountDraft<Physician>>,
) -> Response {
    match state.records.update_physician(&session.token, &id, &body).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => api_failure(e, "Failed to update physician"),
    }
}

/// `DELETE /hospital/physicians/{id}`
pub async fn remove_physician(State(state): State<AppState>, session: ConsoleSession, Path(id): Path<String>) -> Response {
    match state.records.delete_physician(&session.token, &id).await {
        Ok(()) => notice("Physician deleted successfully").into_response(),
        Err(e) => api_failure(e, "Failed to delete physician"),
    }
}

#[cfg(test)]
#[path = "staff_test.rs"]
mod tests;
