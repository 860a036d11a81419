//! Console configuration parsed from environment variables.
//!
//! The records API is reached through exactly one base URL. Every page and
//! every image link is derived from it.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ADMIN_SIGNUP_ROLE: &str = "ADMIN";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Records API base URL without a trailing slash.
    pub records_api_url: String,
    pub port: u16,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// Role label sent with admin self-registration.
    pub admin_signup_role: String,
}

impl ConsoleConfig {
    /// Build typed console config from environment variables.
    ///
    /// Required:
    /// - `RECORDS_API_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: default true
    /// - `ADMIN_SIGNUP_ROLE`: default `ADMIN`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConsoleConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("RECORDS_API_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing { var: "RECORDS_API_URL" })?;
        let records_api_url = normalize_base_url(&raw_url)
            .ok_or(ConfigError::Invalid { var: "RECORDS_API_URL", value: raw_url.clone() })?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.clone() })?,
            None => DEFAULT_PORT,
        };

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw.clone() })?,
            None => true,
        };

        let admin_signup_role = lookup("ADMIN_SIGNUP_ROLE")
            .map(|role| role.trim().to_owned())
            .filter(|role| !role.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_SIGNUP_ROLE.to_owned());

        Ok(Self { records_api_url, port, cookie_secure, admin_signup_role })
    }

    /// Absolute URL for a storage path returned by the records API upload endpoint.
    #[must_use]
    pub fn asset_url(&self, storage_path: &str) -> String {
        format!("{}/{}", self.records_api_url, storage_path.trim_start_matches('/'))
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))?;
    if rest.is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
