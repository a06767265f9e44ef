// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the pipeline backend

use async_trait::async_trait;
use pipedash_core::api::{
    ApiError, Credentials, DashboardApi, Registration, RunReceipt, RunRequest, StatusReport,
    UploadReceipt, UserInfo,
};
use pipedash_core::{
    DashboardConfig, JobId, JobSummary, Pipeline, PipelineId, Submission, SubmissionId, UploadFile,
};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("pipedash/", env!("CARGO_PKG_VERSION"));

/// Multipart field every uploaded file is attached under
pub const UPLOAD_FIELD: &str = "files";

#[derive(Debug, Error)]
pub enum HttpSetupError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// [`DashboardApi`] over HTTP.
///
/// Holds a cookie store so a login persists for the life of the client.
/// Clones share the connection pool and the cookie store.
#[derive(Clone)]
pub struct HttpDashboardApi {
    base: Url,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct AuthStatus {
    is_authenticated: bool,
}

impl HttpDashboardApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, HttpSetupError> {
        let base = Url::parse(base_url).map_err(|e| HttpSetupError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(HttpSetupError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base,
            client: builder.build()?,
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, HttpSetupError> {
        Self::new(&config.base_url, config.request_timeout)
    }

    /// `base` joined with percent-encoded path segments
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send_raw(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_raw(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(network_error)?;
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }
        Ok(body)
    }
}

fn network_error(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

fn upload_form(files: &[UploadFile]) -> Form {
    files.iter().fold(Form::new(), |form, file| {
        form.part(
            UPLOAD_FIELD,
            Part::bytes(file.bytes.clone()).file_name(file.name.clone()),
        )
    })
}

/// User-facing text of a non-2xx reply.
///
/// Prefers the body's `error` string, then the `errors` map of form
/// validation failures, then the HTTP reason phrase.
pub fn rejection_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    };

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };

    if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
        return error.to_string();
    }

    match value.get("errors") {
        Some(serde_json::Value::Object(fields)) => {
            let parts: Vec<String> = fields
                .iter()
                .map(|(field, messages)| format!("{}: {}", field, flatten(messages)))
                .collect();
            if parts.is_empty() {
                fallback()
            } else {
                parts.join("; ")
            }
        }
        Some(other) => flatten(other),
        None => fallback(),
    }
}

fn flatten(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(flatten)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>, ApiError> {
        let url = self.endpoint(&["api", "pipelines"]);
        self.send(self.client.get(url)).await
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, ApiError> {
        let url = self.endpoint(&["api", "submissions"]);
        self.send(self.client.get(url)).await
    }

    async fn upload(&self, files: &[UploadFile]) -> Result<UploadReceipt, ApiError> {
        let url = self.endpoint(&["api", "upload"]);
        self.send(self.client.post(url).multipart(upload_form(files)))
            .await
    }

    async fn create_submission_job(
        &self,
        submission_id: &SubmissionId,
        pipeline_id: &PipelineId,
        files: &[UploadFile],
    ) -> Result<UploadReceipt, ApiError> {
        let url = self.endpoint(&["api", "submissions", submission_id.as_str(), "create-job"]);
        let form = upload_form(files).text("pipeline_id", pipeline_id.to_string());
        self.send(self.client.post(url).multipart(form)).await
    }

    async fn run_job(&self, request: &RunRequest) -> Result<RunReceipt, ApiError> {
        let url = self.endpoint(&["api", "run-job"]);
        self.send(self.client.post(url).json(request)).await
    }

    async fn job_status(&self, job_id: &JobId) -> Result<StatusReport, ApiError> {
        let url = self.endpoint(&["api", "job-status", job_id.as_str()]);
        self.send(self.client.get(url)).await
    }

    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ApiError> {
        let url = self.endpoint(&["api", "jobs"]);
        self.send(self.client.get(url)).await
    }

    async fn check_auth(&self) -> Result<bool, ApiError> {
        let url = self.endpoint(&["api", "check-auth"]);
        let status: AuthStatus = self.send(self.client.get(url)).await?;
        Ok(status.is_authenticated)
    }

    async fn current_user(&self) -> Result<UserInfo, ApiError> {
        let url = self.endpoint(&["api", "user"]);
        self.send(self.client.get(url)).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "login"]);
        self.send_raw(self.client.post(url).json(credentials))
            .await
            .map(drop)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "register"]);
        self.send_raw(self.client.post(url).json(registration))
            .await
            .map(drop)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "logout"]);
        self.send_raw(self.client.post(url)).await.map(drop)
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
