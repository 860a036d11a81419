//! Browser session cookies and role routing.
//!
//! ARCHITECTURE
//! ============
//! A session is three cookies written together after a successful login:
//! the bearer token, the username, and the role label. The console never
//! validates the token itself; the records API does that on every call.
//!
//! Role routing is one exhaustive match. A label that does not parse into a
//! `Role` is rejected before any cookie is written.

use std::fmt;
use std::str::FromStr;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use time::Duration;

pub const TOKEN_COOKIE: &str = "token";
pub const USERNAME_COOKIE: &str = "username";
pub const ROLE_COOKIE: &str = "userRole";

/// Lifetime shared by all session cookies.
pub const SESSION_TTL: Duration = Duration::hours(24);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unrecognized account role: {0:?}")]
    UnknownRole(String),
}

/// Server-assigned account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Admin,
    Radiographer,
    Physician,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::Patient, Self::Admin, Self::Radiographer, Self::Physician];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "PATIENT",
            Self::Admin => "ADMIN",
            Self::Radiographer => "RADIOGRAPHER",
            Self::Physician => "PHYSICIAN",
        }
    }

    /// Landing page for a freshly signed-in session.
    #[must_use]
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Patient => "/patient",
            Self::Admin => "/hospital",
            Self::Radiographer => "/radiographer",
            Self::Physician => "/physician",
        }
    }
}

impl Role {
    /// Parse a role label exactly as the records API spells it.
    pub fn parse(label: &str) -> Result<Self, SessionError> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == label)
            .ok_or_else(|| SessionError::UnknownRole(label.to_owned()))
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::parse(label)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session data persisted in the browser's cookie store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
}

impl Session {
    /// Add the three session cookies to `jar`.
    #[must_use]
    pub fn store(&self, jar: CookieJar, secure: bool) -> CookieJar {
        jar.add(session_cookie(TOKEN_COOKIE, self.token.clone(), secure, SESSION_TTL))
            .add(session_cookie(USERNAME_COOKIE, self.username.clone(), secure, SESSION_TTL))
            .add(session_cookie(ROLE_COOKIE, self.role.as_str().to_owned(), secure, SESSION_TTL))
    }

    /// Read a complete session back. `None` when any cookie is missing, the
    /// token is empty, or the role label is not recognized.
    #[must_use]
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        let token = token_from_jar(jar)?;
        let username = jar.get(USERNAME_COOKIE)?.value().to_owned();
        let role = Role::parse(jar.get(ROLE_COOKIE)?.value()).ok()?;
        Some(Self { token, username, role })
    }
}

/// Non-empty token cookie value, if present.
#[must_use]
pub fn token_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(TOKEN_COOKIE)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

/// Expire the token cookie. Username and role cookies are left to lapse.
#[must_use]
pub fn clear_token(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(session_cookie(TOKEN_COOKIE, String::new(), secure, Duration::ZERO))
}

fn session_cookie(name: &'static str, value: String, secure: bool, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(max_age)
        .build()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
