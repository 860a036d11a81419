//! Landing pages for each role section.

use axum::extract::{Query, State};
use axum::response::{Json, Response};
use serde::Serialize;

use super::auth::ConsoleSession;
use super::patients::PatientView;
use super::radiographs::{self, RadiographView};
use super::{api_failure, list_page};
use crate::api::types::{Hospital, Patient, Radiographer, RecordId};
use crate::services::listing::{ListPage, ListQuery};
use crate::services::session::Role;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HospitalDashboard {
    pub username: Option<String>,
    pub hospital: Hospital,
}

#[derive(Debug, Serialize)]
pub struct PatientDashboard {
    pub profile: PatientView,
    pub radiographs: Vec<RadiographView>,
}

#[derive(Debug, Serialize)]
pub struct RadiographerDashboard {
    pub username: Option<String>,
    pub profile: Radiographer,
}

#[derive(Debug, Serialize)]
pub struct PhysicianDashboard {
    pub username: Option<String>,
    pub role: Option<Role>,
    pub patients: ListPage<Patient>,
}

/// `GET /hospital`: the administrator's hospital card.
pub async fn hospital(State(state): State<AppState>, session: ConsoleSession) -> Result<Json<HospitalDashboard>, Response> {
    let hospital = state
        .records
        .hospital_for_admin(&session.token)
        .await
        .map_err(|e| api_failure(e, "Failed to fetch hospital"))?;
    Ok(Json(HospitalDashboard { username: session.username, hospital }))
}

/// `GET /patient`: own profile and radiographs.
pub async fn patient(State(state): State<AppState>, session: ConsoleSession) -> Result<Json<PatientDashboard>, Response> {
    let profile = state
        .records
        .patient_profile(&session.token)
        .await
        .map_err(|e| api_failure(e, "Failed to fetch profile"))?;

    let radiographs = match profile.id.as_ref().map(RecordId::to_string) {
        Some(id) => state
            .records
            .radiographs_for_patient(&session.token, &id)
            .await
            .map_err(|e| api_failure(e, radiographs::FETCH_FAILED))?,
        None => Vec::new(),
    };

    Ok(Json(PatientDashboard {
        profile: PatientView::resolve(&state, profile),
        radiographs: radiographs::resolve_all(&state, radiographs),
    }))
}

/// `GET /radiographer`
pub async fn radiographer(
    State(state): State<AppState>,
    session: ConsoleSession,
) -> Result<Json<RadiographerDashboard>, Response> {
    let profile = state
        .records
        .radiographer_profile(&session.token)
        .await
        .map_err(|e| api_failure(e, "Failed to fetch profile"))?;
    Ok(Json(RadiographerDashboard { username: session.username, profile }))
}

/// `GET /physician`: session summary with a read-only patient table.
pub async fn physician(
    State(state): State<AppState>,
    session: ConsoleSession,
    Query(query): Query<ListQuery>,
) -> Result<Json<PhysicianDashboard>, Response> {
    let Json(patients) = list_page(
        state.records.patients(&session.token).await,
        &query,
        "Failed to fetch patients",
    )?;
    Ok(Json(PhysicianDashboard { username: session.username, role: session.role, patients }))
}

#[cfg(test)]
#[path = "dashboards_test.rs"]
mod tests;
