//! Records API access.
//!
//! ARCHITECTURE
//! ============
//! `RecordsApi` is the transport seam: it sends one request and hands back
//! the raw status and body. `Records` sits on top and owns the endpoint
//! catalogue, status classification, and JSON decoding, so tests can script
//! the transport without a network.

pub mod error;
pub mod http;
pub mod records;
pub mod types;

use reqwest::Method;

pub use error::ApiError;
pub use records::{LoginOutcome, Records};

/// A file forwarded to the records API as one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(serde_json::Value),
    /// Multipart form where every file is sent under the same field name.
    Files { field: &'static str, files: Vec<Upload> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the records API base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    /// Bearer token, if the call is authorized.
    pub token: Option<String>,
    pub payload: Payload,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), token: None, payload: Payload::Empty }
    }

    #[must_use]
    pub fn bearer(mut self, token: &str) -> Self {
        self.token = Some(token.to_owned());
        self
    }

    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    #[must_use]
    pub fn files(mut self, field: &'static str, files: Vec<Upload>) -> Self {
        self.payload = Payload::Files { field, files };
        self
    }

    #[must_use]
    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }
}

/// Status and body exactly as the records API returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport to the records API.
#[async_trait::async_trait]
pub trait RecordsApi: Send + Sync {
    /// Send one request. Only transport failures are errors here; non-2xx
    /// statuses come back as a normal `RawResponse`.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}
