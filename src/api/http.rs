//! `reqwest` transport for the records API.

use reqwest::multipart::{Form, Part};

use super::{ApiError, ApiRequest, Payload, RawResponse, RecordsApi, Upload};

pub struct HttpRecordsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordsApi {
    /// `base_url` must already be normalized (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn multipart_form(field: &'static str, files: Vec<Upload>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for upload in files {
        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| ApiError::Upload(format!("unsupported content type {content_type:?}: {e}")))?;
        }
        form = form.part(field, part);
    }
    Ok(form)
}

#[async_trait::async_trait]
impl RecordsApi for HttpRecordsApi {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.url(&request.path);
        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = request.token.as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder = match request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::Files { field, files } => builder.multipart(multipart_form(field, files)?),
        };

        let resp = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, method = %request.method, %url, "records api request failed");
            ApiError::Network(e.to_string())
        })?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        tracing::debug!(method = %request.method, path = %request.path, status, "records api responded");
        Ok(RawResponse { status, body: body.to_vec() })
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
