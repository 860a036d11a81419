//! Typed records API endpoints.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    AccountDraft, AdminRegistration, Credentials, Hospital, LoginResponse, Patient, Physician, Radiograph, Radiographer,
    StoredDocument,
};
use super::{ApiError, ApiRequest, RawResponse, RecordsApi, Upload};

/// Outcome of a credential exchange that reached the records API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(LoginResponse),
    /// The account exists but must set a password first (HTTP 422).
    PasswordResetRequired,
}

/// Typed facade over a [`RecordsApi`] transport.
#[derive(Clone)]
pub struct Records {
    transport: Arc<dyn RecordsApi>,
}

impl Records {
    #[must_use]
    pub fn new(transport: Arc<dyn RecordsApi>) -> Self {
        Self { transport }
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ApiError> {
        let request = ApiRequest::new(Method::POST, "/auth/login").json(to_json(credentials)?);
        let resp = self.transport.send(request).await?;
        if resp.status == 422 {
            return Ok(LoginOutcome::PasswordResetRequired);
        }
        let login: LoginResponse = decode(resp)?;
        if login.token.trim().is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".into()));
        }
        Ok(LoginOutcome::Authenticated(login))
    }

    pub async fn register_admin(&self, registration: &AdminRegistration) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::POST, "/admin").json(to_json(registration)?);
        self.transport.send(request).await.and_then(expect_success)
    }

    // =========================================================================
    // HOSPITAL
    // =========================================================================

    pub async fn hospital_for_admin(&self, token: &str) -> Result<Hospital, ApiError> {
        self.get(token, "/hospital/get-by-admin".into()).await
    }

    // =========================================================================
    // PATIENTS
    // =========================================================================

    pub async fn patients(&self, token: &str) -> Result<Vec<Patient>, ApiError> {
        self.get(token, "/patient".into()).await
    }

    pub async fn patient(&self, token: &str, id: &str) -> Result<Patient, ApiError> {
        self.get(token, item_path("/patient", id)?).await
    }

    pub async fn patient_profile(&self, token: &str) -> Result<Patient, ApiError> {
        self.get(token, "/patient/profile".into()).await
    }

    pub async fn create_patient(&self, token: &str, patient: &AccountDraft<Patient>) -> Result<Patient, ApiError> {
        self.write(token, Method::POST, "/patient".into(), patient).await
    }

    pub async fn update_patient(
        &self,
        token: &str,
        id: &str,
        patient: &AccountDraft<Patient>,
    ) -> Result<Patient, ApiError> {
        self.write(token, Method::PUT, item_path("/patient", id)?, patient).await
    }

    pub async fn delete_patient(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.delete(token, item_path("/patient", id)?).await
    }

    /// Enroll fingerprint images for a patient.
    pub async fn add_fingerprints(&self, token: &str, patient_id: &str, files: Vec<Upload>) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::POST, "/patient/add-fingerprint")
            .query("userId", segment(patient_id)?)
            .bearer(token)
            .files("files", files);
        self.transport.send(request).await.and_then(expect_success)
    }

    /// Identify a patient from one scanned fingerprint image.
    pub async fn patient_by_fingerprint(&self, token: &str, scan: Upload) -> Result<Patient, ApiError> {
        let request = ApiRequest::new(Method::POST, "/patient/get-by-fingerprint")
            .bearer(token)
            .files("file", vec![scan]);
        decode(self.transport.send(request).await?)
    }

    // =========================================================================
    // STAFF
    // =========================================================================

    pub async fn radiographers(&self, token: &str) -> Result<Vec<Radiographer>, ApiError> {
        self.get(token, "/radiographer".into()).await
    }

    pub async fn radiographer_profile(&self, token: &str) -> Result<Radiographer, ApiError> {
        self.get(token, "/radiographer/profile".into()).await
    }

    pub async fn create_radiographer(
        &self,
        token: &str,
        radiographer: &AccountDraft<Radiographer>,
    ) -> Result<Radiographer, ApiError> {
        self.write(token, Method::POST, "/radiographer".into(), radiographer).await
    }

    pub async fn update_radiographer(
        &self,
        token: &str,
        id: &str,
        radiographer: &AccountDraft<Radiographer>,
    ) -> Result<Radiographer, ApiError> {
        self.write(token, Method::PUT, item_path("/radiographer", id)?, radiographer).await
    }

    pub async fn delete_radiographer(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.delete(token, item_path("/radiographer", id)?).await
    }

    pub async fn physicians(&self, token: &str) -> Result<Vec<Physician>, ApiError> {
        self.get(token, "/physician".into()).await
    }

    pub async fn create_physician(&self, token: &str, physician: &AccountDraft<Physician>) -> Result<Physician, ApiError> {
        self.write(token, Method::POST, "/physician".into(), physician).await
    }

    pub async fn update_physician(
        &self,
        token: &str,
        id: &str,
        physician: &AccountDraft<Physician>,
    ) -> Result<Physician, ApiError> {
        self.write(token, Method::PUT, item_path("/physician", id)?, physician).await
    }

    pub async fn delete_physician(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.delete(token, item_path("/physician", id)?).await
    }

    // =========================================================================
    // RADIOGRAPHS
    // =========================================================================

    pub async fn radiographs_for_patient(&self, token: &str, patient_id: &str) -> Result<Vec<Radiograph>, ApiError> {
        self.get(token, item_path("/radiograph/get-by-patient", patient_id)?).await
    }

    pub async fn create_radiograph(
        &self,
        token: &str,
        patient_id: &str,
        radiograph: &Radiograph,
    ) -> Result<Radiograph, ApiError> {
        self.write(token, Method::POST, item_path("/radiograph/create-for-patient", patient_id)?, radiograph)
            .await
    }

    pub async fn update_radiograph(&self, token: &str, id: &str, radiograph: &Radiograph) -> Result<Radiograph, ApiError> {
        self.write(token, Method::PUT, item_path("/radiograph", id)?, radiograph).await
    }

    pub async fn delete_radiograph(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.delete(token, item_path("/radiograph", id)?).await
    }

    // =========================================================================
    // DOCUMENTS
    // =========================================================================

    pub async fn upload_document(&self, token: &str, file: Upload) -> Result<StoredDocument, ApiError> {
        let request = ApiRequest::new(Method::POST, "/documents/upload")
            .bearer(token)
            .files("file", vec![file]);
        decode(self.transport.send(request).await?)
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    async fn get<T: DeserializeOwned>(&self, token: &str, path: String) -> Result<T, ApiError> {
        let resp = self.transport.send(ApiRequest::new(Method::GET, path).bearer(token)).await?;
        decode(resp)
    }

    async fn write<B: Serialize, T: DeserializeOwned>(
        &self,
        token: &str,
        method: Method,
        path: String,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = ApiRequest::new(method, path).bearer(token).json(to_json(body)?);
        decode(self.transport.send(request).await?)
    }

    async fn delete(&self, token: &str, path: String) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::DELETE, path).bearer(token);
        self.transport.send(request).await.and_then(expect_success)
    }
}

/// Validate a record id for use as one URL path segment.
pub(crate) fn segment(id: &str) -> Result<&str, ApiError> {
    let valid = !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid { Ok(id) } else { Err(ApiError::InvalidId(id.to_owned())) }
}

fn item_path(prefix: &str, id: &str) -> Result<String, ApiError> {
    Ok(format!("{prefix}/{}", segment(id)?))
}

fn to_json<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn expect_success(resp: RawResponse) -> Result<(), ApiError> {
    if resp.is_success() { Ok(()) } else { Err(ApiError::from_status(resp.status, &resp.body)) }
}

fn decode<T: DeserializeOwned>(resp: RawResponse) -> Result<T, ApiError> {
    if !resp.is_success() {
        return Err(ApiError::from_status(resp.status, &resp.body));
    }
    serde_json::from_slice(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
