//! Records API failure classification.

use axum::http::StatusCode;

/// Message shown for any transport failure.
pub const NETWORK_MESSAGE: &str = "Network error. Please try again later.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("records api unreachable: {0}")]
    Network(String),
    #[error("records api returned status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("unexpected records api response: {0}")]
    Decode(String),
    #[error("invalid record id: {0:?}")]
    InvalidId(String),
    #[error("invalid upload: {0}")]
    Upload(String),
}

impl ApiError {
    /// Build a status error from a non-2xx body, keeping the server's own
    /// `message` (or `error`) text when the body carries one.
    #[must_use]
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        Self::Status { status, message: server_message(body) }
    }

    /// Text to show the user: the server's message verbatim when present,
    /// the generic network message for transport failures, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message: Some(message), .. } => message.clone(),
            Self::Network(_) => NETWORK_MESSAGE.to_owned(),
            Self::Upload(reason) => reason.clone(),
            Self::Status { message: None, .. } | Self::Decode(_) | Self::InvalidId(_) => fallback.to_owned(),
        }
    }

    /// Status the console answers with for this failure.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Status { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::Network(_) | Self::Decode(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidId(_) | Self::Upload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_owned)
}
