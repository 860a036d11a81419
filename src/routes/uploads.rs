//! Multipart intake and document uploads.

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use super::api_failure;
use super::auth::ConsoleSession;
use crate::api::{ApiError, Upload};
use crate::state::AppState;

const UPLOAD_FAILED: &str = "Failed to upload file";

/// Stored document plus the absolute link the browser can fetch.
#[derive(Debug, Serialize)]
pub struct UploadedDocument {
    pub location: String,
    pub url: String,
}

/// Read every part named `field` from a multipart body. Parts with no
/// bytes are skipped; other field names are ignored.
pub(crate) async fn collect_uploads(mut multipart: Multipart, field: &str) -> Result<Vec<Upload>, ApiError> {
    let mut uploads = Vec::new();
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.body_text()))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let file_name = part.file_name().unwrap_or("upload").to_owned();
        let content_type = part.content_type().map(str::to_owned);
        let bytes = part.bytes().await.map_err(|e| ApiError::Upload(e.body_text()))?;
        if bytes.is_empty() {
            continue;
        }
        uploads.push(Upload { file_name, content_type, bytes: bytes.to_vec() });
    }
    Ok(uploads)
}

/// `POST /{section}/uploads`: store one file (multipart `file`) and return
/// its storage path with the absolute URL.
pub async fn upload_document(State(state): State<AppState>, session: ConsoleSession, multipart: Multipart) -> Response {
    let file = match collect_uploads(multipart, "file").await {
        Ok(mut files) if !files.is_empty() => files.swap_remove(0),
        Ok(_) => return api_failure(ApiError::Upload("Please select a file to upload.".into()), UPLOAD_FAILED),
        Err(e) => return api_failure(e, UPLOAD_FAILED),
    };
    let size = file.bytes.len();
    match state.records.upload_document(&session.token, file).await {
        Ok(stored) => {
            tracing::info!(location = %stored.location, size, "document stored");
            let url = state.config.asset_url(&stored.location);
            Json(UploadedDocument { location: stored.location, url }).into_response()
        }
        Err(e) => api_failure(e, UPLOAD_FAILED),
    }
}

#[cfg(test)]
#[path = "uploads_test.rs"]
mod tests;
