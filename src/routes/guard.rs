//! Sign-in guard for the role sections.
//!
//! Presence of a non-empty `token` cookie is the whole check. Whether the
//! token is still valid is for the records API to decide on each call.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::services::session;

pub const SIGN_IN_PATH: &str = "/auth/sign-in";
pub const PUBLIC_PREFIX: &str = "/auth";
pub const PROTECTED_PREFIXES: [&str; 4] = ["/hospital", "/patient", "/radiographer", "/physician"];

/// True when `path` is `prefix` itself or lies below it.
fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[must_use]
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| under(path, prefix))
}

#[must_use]
pub fn is_public(path: &str) -> bool {
    under(path, PUBLIC_PREFIX)
}

/// Whether a request for `path` must be sent to the sign-in page.
#[must_use]
pub fn requires_sign_in(path: &str, has_token: bool) -> bool {
    !has_token && is_protected(path) && !is_public(path)
}

/// Axum middleware redirecting token-less requests for protected paths.
pub async fn require_token(jar: CookieJar, request: Request, next: Next) -> Response {
    let has_token = session::token_from_jar(&jar).is_some();
    if requires_sign_in(request.uri().path(), has_token) {
        tracing::debug!(path = %request.uri().path(), "no session token; redirecting to sign-in");
        return Redirect::temporary(SIGN_IN_PATH).into_response();
    }
    next.run(request).await
}
