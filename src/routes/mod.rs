//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The console is a backend-for-frontend. `/auth/*` is public; the four role
//! sections sit behind the token guard, which wraps the whole router so
//! unknown paths under a protected prefix redirect too. Every section handler
//! forwards to the records API with the session's bearer token.

pub mod auth;
pub mod dashboards;
pub mod guard;
pub mod patients;
pub mod radiographs;
pub mod staff;
pub mod uploads;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post, put};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::api::ApiError;
use crate::services::listing::{ListPage, ListQuery, Person};
use crate::services::session::Session;
use crate::state::AppState;

/// Largest multipart body accepted on upload routes.
pub const UPLOAD_BODY_LIMIT: usize = 25 * 1024 * 1024;

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-in", get(auth::sign_in_page).post(auth::sign_in))
        .route("/auth/sign-up", get(auth::sign_up_page).post(auth::sign_up))
        .route("/auth/set-password", get(auth::set_password_page))
        .route("/auth/logout", post(auth::logout))
}

fn hospital_routes() -> Router<AppState> {
    Router::new()
        .route("/hospital", get(dashboards::hospital))
        .route("/hospital/patients", get(patients::list).post(patients::create))
        .route(
            "/hospital/patients/{id}",
            get(patients::detail).put(patients::update).delete(patients::remove),
        )
        .route(
            "/hospital/patients/{id}/radiographs",
            get(radiographs::list_for_patient).post(radiographs::create_for_patient),
        )
        .route(
            "/hospital/patients/{id}/fingerprints",
            post(patients::enroll_fingerprints).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/hospital/radiographs/{id}", put(radiographs::update).delete(radiographs::remove))
        .route("/hospital/radiographers", get(staff::list_radiographers).post(staff::create_radiographer))
        .route(
            "/hospital/radiographers/{id}",
            put(staff::update_radiographer).delete(staff::remove_radiographer),
        )
        .route("/hospital/physicians", get(staff::list_physicians).post(staff::create_physician))
        .route("/hospital/physicians/{id}", put(staff::update_physician).delete(staff::remove_physician))
        .route(
            "/hospital/uploads",
            post(uploads::upload_document).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}

fn patient_routes() -> Router<AppState> {
    Router::new()
        .route("/patient", get(dashboards::patient))
        .route("/patient/reports", get(radiographs::own_reports))
        .route("/patient/radiographs/{id}", axum::routing::delete(radiographs::remove))
}

fn radiographer_routes() -> Router<AppState> {
    Router::new()
        .route("/radiographer", get(dashboards::radiographer))
        .route("/radiographer/patients", get(patients::list).post(patients::create))
        .route(
            "/radiographer/patients/scan",
            post(patients::scan_fingerprint).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/radiographer/patients/{id}",
            get(patients::detail).put(patients::update).delete(patients::remove),
        )
        .route(
            "/radiographer/uploads",
            post(uploads::upload_document).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}

fn physician_routes() -> Router<AppState> {
    Router::new().route("/physician", get(dashboards::physician))
}

/// Full console router: public auth pages, guarded role sections, health check.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        .route("/healthz", get(healthz))
        .merge(auth_routes())
        .merge(hospital_routes())
        .merge(patient_routes())
        .merge(radiographer_routes())
        .merge(physician_routes())
        .fallback(not_found)
        .layer(middleware::from_fn(guard::require_token))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `/` sends a complete session to its role home, anything else to sign-in.
async fn root_redirect(jar: CookieJar) -> Redirect {
    match Session::from_jar(&jar) {
        Some(session) => Redirect::temporary(session.role.home_path()),
        None => Redirect::temporary(guard::SIGN_IN_PATH),
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

// =============================================================================
// RESPONSE HELPERS
// =============================================================================

/// Terminal response for a failed records API call.
pub(crate) fn api_failure(err: ApiError, fallback: &str) -> Response {
    tracing::warn!(error = %err, "records api call failed");
    (err.status_code(), Json(json!({ "error": err.user_message(fallback) }))).into_response()
}

/// Success notice for actions that return no record.
pub(crate) fn notice(message: &str) -> Json<serde_json::Value> {
    Json(json!({ "message": message }))
}

/// Build a filtered list page from a fetch result. A failed fetch answers
/// with the error alone, so the browser keeps the rows it already shows.
pub(crate) fn list_page<T: Person>(
    result: Result<Vec<T>, ApiError>,
    query: &ListQuery,
    fallback: &str,
) -> Result<Json<ListPage<T>>, Response> {
    let rows = result.map_err(|err| api_failure(err, fallback))?;
    Ok(Json(ListPage::build(rows, query)))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
