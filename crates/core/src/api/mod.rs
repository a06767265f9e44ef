// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend access seam
//!
//! The pipeline backend is a black box reached only through its HTTP
//! contract. Everything in this crate talks to it through [`DashboardApi`];
//! the real client lives in `pipedash-adapters`.

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ApiCall, FakeDashboardApi, PollGate};

use crate::model::{
    JobId, JobStatus, JobSummary, Pipeline, PipelineId, Submission, SubmissionId, UploadFile,
};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors from backend calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The request never completed
    #[error("network error: {0}")]
    Network(String),
    /// The server answered 2xx with a body of the wrong shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of a rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Reply to a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(rename = "jobId", alias = "job_id")]
    pub job_id: JobId,
    #[serde(default)]
    pub filenames: Vec<String>,
}

/// Body of `POST /api/run-job`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRequest {
    #[serde(rename = "jobId")]
    pub job_id: JobId,
    #[serde(rename = "pipelineId")]
    pub pipeline_id: PipelineId,
    #[serde(rename = "submissionId", skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<SubmissionId>,
}

/// Reply to a successful run request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub docker_command_simulation: Option<String>,
}

/// Reply to a job-status poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: JobStatus,
    #[serde(default, deserialize_with = "percent")]
    pub progress: u8,
    #[serde(default, deserialize_with = "title")]
    pub process_title: String,
}

impl StatusReport {
    pub fn new(status: JobStatus, progress: u8, process_title: impl Into<String>) -> Self {
        Self {
            status,
            progress,
            process_title: process_title.into(),
        }
    }
}

/// Progress arrives as an integer, a float or `null`; it is truncated into
/// `0..=100` and `null` reads as 0
fn percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if value.is_nan() {
        return Ok(0);
    }
    Ok(value.clamp(0.0, 100.0) as u8)
}

// A job without a title yet reports `null`
fn title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
}

/// Login form body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration form body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Client for the pipeline backend's HTTP API
#[async_trait]
pub trait DashboardApi: Clone + Send + Sync + 'static {
    /// `GET /api/pipelines`
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>, ApiError>;

    /// `GET /api/submissions`
    async fn list_submissions(&self) -> Result<Vec<Submission>, ApiError>;

    /// `POST /api/upload` with every file in one multipart request
    async fn upload(&self, files: &[UploadFile]) -> Result<UploadReceipt, ApiError>;

    /// `POST /api/submissions/{id}/create-job` with every file in one multipart request
    async fn create_submission_job(
        &self,
        submission_id: &SubmissionId,
        pipeline_id: &PipelineId,
        files: &[UploadFile],
    ) -> Result<UploadReceipt, ApiError>;

    /// `POST /api/run-job`
    async fn run_job(&self, request: &RunRequest) -> Result<RunReceipt, ApiError>;

    /// `GET /api/job-status/{id}`
    async fn job_status(&self, job_id: &JobId) -> Result<StatusReport, ApiError>;

    /// `GET /api/jobs`
    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ApiError>;

    /// `GET /api/check-auth`
    async fn check_auth(&self) -> Result<bool, ApiError>;

    /// `GET /api/user`
    async fn current_user(&self) -> Result<UserInfo, ApiError>;

    /// `POST /api/login`
    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError>;

    /// `POST /api/register`
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    /// `POST /api/logout`
    async fn logout(&self) -> Result<(), ApiError>;
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
