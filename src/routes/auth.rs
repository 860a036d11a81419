//! Auth routes: sign-in, admin sign-up, logout, and the session extractor.

use axum::extract::{FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::json;

use super::api_failure;
use super::guard::SIGN_IN_PATH;
use crate::api::LoginOutcome;
use crate::api::types::{AdminRegistration, Credentials};
use crate::services::forms::{self, SignInForm, SignUpForm};
use crate::services::session::{self, Role, Session};
use crate::state::AppState;

pub const SET_PASSWORD_PATH: &str = "/auth/set-password";
pub const ROLE_NOT_FOUND: &str = "Account role not found";
const SIGN_IN_FALLBACK: &str = "An error occurred. Please try again.";
const SIGN_UP_FALLBACK: &str = "Registration failed. Please try again.";
const SIGN_UP_DONE: &str = "Credentials have been sent to your email.";

// =============================================================================
// SESSION EXTRACTOR
// =============================================================================

/// Session cookies of the current request.
/// Use as a handler parameter to get the bearer token for records API calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSession {
    pub token: String,
    pub username: Option<String>,
    pub role: Option<Role>,
}

impl<S> FromRequestParts<S> for ConsoleSession
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session::token_from_jar(&jar).ok_or_else(|| Redirect::temporary(SIGN_IN_PATH))?;
        let username = jar.get(session::USERNAME_COOKIE).map(|c| c.value().to_owned());
        let role = jar
            .get(session::ROLE_COOKIE)
            .map(Cookie::value)
            .and_then(|label| label.parse().ok());
        Ok(Self { token, username, role })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /auth/sign-in`: exchange credentials, write session cookies, go home.
pub async fn sign_in(State(state): State<AppState>, jar: CookieJar, Form(form): Form<SignInForm>) -> Response {
    if let Some(problem) = forms::sign_in_error(&form) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": problem }))).into_response();
    }

    let credentials = Credentials { email: form.email, password: form.password };
    let login = match state.records.login(&credentials).await {
        Ok(LoginOutcome::Authenticated(login)) => login,
        Ok(LoginOutcome::PasswordResetRequired) => return Redirect::to(SET_PASSWORD_PATH).into_response(),
        Err(e) => return api_failure(e, SIGN_IN_FALLBACK),
    };

    let role = match Role::parse(login.primary_role().unwrap_or_default()) {
        Ok(role) => role,
        Err(e) => {
            tracing::warn!(error = %e, "sign-in returned an unusable role");
            return (StatusCode::FORBIDDEN, Json(json!({ "alert": ROLE_NOT_FOUND }))).into_response();
        }
    };

    let session = Session { token: login.token, username: credentials.email, role };
    tracing::info!(role = %role, "session started");
    let jar = session.store(jar, state.config.cookie_secure);
    (jar, Redirect::to(role.home_path())).into_response()
}

/// `POST /auth/sign-up`: register a hospital administrator.
pub async fn sign_up(State(state): State<AppState>, Form(form): Form<SignUpForm>) -> Response {
    let errors = forms::sign_up_errors(&form);
    if !errors.is_empty() {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errors }))).into_response();
    }

    let registration = AdminRegistration {
        full_name: form.full_name,
        username: form.username,
        email: form.email,
        phone_number: form.phone_number,
        role: state.config.admin_signup_role.clone(),
    };
    match state.records.register_admin(&registration).await {
        Ok(()) => Json(json!({ "message": SIGN_UP_DONE })).into_response(),
        Err(e) => api_failure(e, SIGN_UP_FALLBACK),
    }
}

/// `POST /auth/logout`: expire the token cookie and return to sign-in.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (session::clear_token(jar, state.config.cookie_secure), Redirect::to(SIGN_IN_PATH))
}

// =============================================================================
// PAGES
// =============================================================================

const SIGN_IN_PAGE: &str = r#"<!doctype html>
<html><head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<h1>X-RAY IMAGE</h1><p>Management System</p>
<form method="post" action="/auth/sign-in">
<label>Email address <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Sign in</button>
</form>
<p><a href="/auth/sign-up">Register a hospital administrator</a></p>
</body></html>"#;

const SIGN_UP_PAGE: &str = r#"<!doctype html>
<html><head><meta charset="utf-8"><title>Sign up</title></head>
<body>
<h1>Sign Up</h1>
<p>Already have an account? <a href="/auth/sign-in">Sign in here</a></p>
<form method="post" action="/auth/sign-up">
<label>Full Name <input type="text" name="fullName"></label>
<label>Username <input type="text" name="username"></label>
<label>Email Address <input type="email" name="email"></label>
<label>Phone Number <input type="text" name="phoneNumber"></label>
<button type="submit">Sign Up</button>
</form>
</body></html>"#;

const SET_PASSWORD_PAGE: &str = r#"<!doctype html>
<html><head><meta charset="utf-8"><title>Set password</title></head>
<body>
<h1>Set your password</h1>
<p>This account has no password yet. Use the link sent to your email, then <a href="/auth/sign-in">sign in</a>.</p>
</body></html>"#;

/// `GET /auth/sign-in`
pub async fn sign_in_page() -> Html<&'static str> {
    Html(SIGN_IN_PAGE)
}

/// `GET /auth/sign-up`
pub async fn sign_up_page() -> Html<&'static str> {
    Html(SIGN_UP_PAGE)
}

/// `GET /auth/set-password`
pub async fn set_password_page() -> Html<&'static str> {
    Html(SET_PASSWORD_PAGE)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
