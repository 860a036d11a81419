//! Sign-in and sign-up form checks run before anything reaches the records API.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
}

/// `local@domain.tld` shape: no whitespace, one `@`, a dot inside the domain.
#[must_use]
pub fn is_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[must_use]
pub fn is_phone_number(raw: &str) -> bool {
    raw.len() == 10 && raw.bytes().all(|b| b.is_ascii_digit())
}

/// First problem with a sign-in form, if any.
#[must_use]
pub fn sign_in_error(form: &SignInForm) -> Option<&'static str> {
    if form.email.is_empty() {
        return Some("Please include an email address.");
    }
    if !is_email(&form.email) {
        return Some("Please enter a valid email address.");
    }
    None
}

/// Field-level problems with a sign-up form, keyed by form field name.
#[must_use]
pub fn sign_up_errors(form: &SignUpForm) -> BTreeMap<&'static str, &'static str> {
    let mut errors = BTreeMap::new();
    if form.full_name.trim().is_empty() {
        errors.insert("fullName", "Full name is required");
    }
    if form.username.trim().is_empty() {
        errors.insert("username", "Username is required");
    }
    if form.email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_email(&form.email) {
        errors.insert("email", "Email address is invalid");
    }
    if form.phone_number.is_empty() {
        errors.insert("phoneNumber", "Phone number is required");
    } else if !is_phone_number(&form.phone_number) {
        errors.insert("phoneNumber", "Phone number is invalid");
    }
    errors
}
