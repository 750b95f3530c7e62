//! HTTP client for the detection, archive, and auth services.
//!
//! The services are black boxes: this module only knows their wire shapes.
//! Transport failures map to `Network`, credential failures to `Auth`, and
//! anything else the services reject to `Service`.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::Config;
use crate::errors::{AuthFailure, ClientError, ClientResult};
use crate::models::{AnalysisResult, HistoryRecord, Role};
use crate::submission::SubmissionPayload;

/// Successful login body: `{ "user": { "email": ..., "role": ... }, ... }`.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: LoginUser,
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    email: String,
    #[serde(default = "default_role")]
    role: Role,
}

fn default_role() -> Role {
    Role::Standard
}

/// Error body the services return: `{ "error": "..." }`.
#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    error: String,
}

/// Client for the remote FactFusion services.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for an identity and role.
    ///
    /// Failure reasons are limited to invalid credentials, an unreachable
    /// network, and a server-side error.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<(String, Role)> {
        let response = self
            .http
            .post(self.url("/api/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(auth_transport_error)?;

        match response.status() {
            StatusCode::OK => {
                let body: LoginResponse = response
                    .json()
                    .await
                    .map_err(|e| ClientError::Auth(AuthFailure::ServerError).log_cause(e))?;
                Ok((body.user.email, body.user.role))
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Auth(AuthFailure::InvalidCredentials)),
            status => {
                tracing::error!("Login failed with status {}", status);
                Err(ClientError::Auth(AuthFailure::ServerError))
            }
        }
    }

    /// Submit a multimodal payload for classification.
    ///
    /// Text always travels as a string field (possibly empty); the image, when
    /// present, as a binary attachment.
    pub async fn analyze(&self, payload: &SubmissionPayload) -> ClientResult<AnalysisResult> {
        tracing::debug!(
            mode = payload.mode.as_str(),
            has_image = payload.image.is_some(),
            "Submitting analysis"
        );
        let mut form = Form::new().text("text", payload.text.clone());
        if let Some(image) = &payload.image {
            form = form.part(
                "file",
                Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
            );
        }

        let response = self
            .http
            .post(self.url("/api/v1/analyze"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.service_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Fetch the ordered collection of past analyses.
    pub async fn history(&self) -> ClientResult<Vec<HistoryRecord>> {
        let response = self.http.get(self.url("/api/v1/analysis-history")).send().await?;

        if !response.status().is_success() {
            return Err(self.service_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Remove one record from the archive.
    pub async fn delete_history_record(&self, id: &str) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/v1/analysis-history/{}", id)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.service_error(response).await);
        }
        Ok(())
    }

    async fn service_error(&self, response: reqwest::Response) -> ClientError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Service rejected the session");
            return ClientError::Auth(AuthFailure::SessionExpired);
        }
        let detail = response
            .json::<ServiceError>()
            .await
            .map(|b| b.error)
            .unwrap_or_default();
        tracing::error!("Service returned {}: {}", status, detail);
        if detail.is_empty() {
            ClientError::Service(format!("Service returned {}", status))
        } else {
            ClientError::Service(detail)
        }
    }
}

fn auth_transport_error(err: reqwest::Error) -> ClientError {
    if err.is_connect() || err.is_timeout() {
        tracing::warn!("Auth service unreachable: {}", err);
        ClientError::Auth(AuthFailure::NetworkUnreachable)
    } else {
        tracing::error!("Auth request failed: {}", err);
        ClientError::Auth(AuthFailure::ServerError)
    }
}

impl ClientError {
    fn log_cause(self, cause: reqwest::Error) -> Self {
        tracing::error!("{}: {}", self, cause);
        self
    }
}
