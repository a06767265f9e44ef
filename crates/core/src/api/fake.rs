// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake backend for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    ApiError, Credentials, DashboardApi, Registration, RunReceipt, RunRequest, StatusReport,
    UploadReceipt, UserInfo,
};
use crate::model::{JobId, JobSummary, Pipeline, PipelineId, Submission, SubmissionId, UploadFile};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListPipelines,
    ListSubmissions,
    Upload {
        filenames: Vec<String>,
    },
    CreateSubmissionJob {
        submission_id: SubmissionId,
        pipeline_id: PipelineId,
        filenames: Vec<String>,
    },
    RunJob(RunRequest),
    JobStatus {
        job_id: JobId,
    },
    ListJobs,
    CheckAuth,
    CurrentUser,
    Login {
        username: String,
    },
    Register {
        username: String,
    },
    Logout,
}

/// Holds job-status replies until the test releases them.
///
/// Calls are recorded before they block, so a test can observe that a poll
/// was issued while its reply is still outstanding.
#[derive(Clone)]
pub struct PollGate {
    permits: Arc<Semaphore>,
}

impl PollGate {
    /// Let `n` held replies through
    pub fn release(&self, n: usize) {
        self.permits.add_permits(n);
    }
}

#[derive(Default)]
struct FakeState {
    pipelines: Option<Result<Vec<Pipeline>, ApiError>>,
    submissions: Option<Result<Vec<Submission>, ApiError>>,
    uploads: VecDeque<Result<UploadReceipt, ApiError>>,
    runs: VecDeque<Result<RunReceipt, ApiError>>,
    statuses: HashMap<JobId, VecDeque<Result<StatusReport, ApiError>>>,
    jobs: Vec<JobSummary>,
    jobs_error: Option<ApiError>,
    authenticated: bool,
    user: Option<UserInfo>,
    login_error: Option<ApiError>,
    auth_error: Option<ApiError>,
    gate: Option<PollGate>,
    calls: Vec<ApiCall>,
}

/// Fake backend that replays scripted replies and records every call
#[derive(Clone, Default)]
pub struct FakeDashboardApi {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeDashboardApi {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.state().authenticated = true;
        fake
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: ApiCall) {
        self.state().calls.push(call);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state().calls.clone()
    }

    /// Number of job-status polls issued for a job
    pub fn poll_count(&self, job_id: &JobId) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, ApiCall::JobStatus { job_id: id } if id == job_id))
            .count()
    }

    /// Number of calls that reached the network at all
    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    pub fn set_pipelines(&self, pipelines: Vec<Pipeline>) {
        self.state().pipelines = Some(Ok(pipelines));
    }

    pub fn fail_pipelines(&self, error: ApiError) {
        self.state().pipelines = Some(Err(error));
    }

    pub fn set_submissions(&self, submissions: Vec<Submission>) {
        self.state().submissions = Some(Ok(submissions));
    }

    pub fn fail_submissions(&self, error: ApiError) {
        self.state().submissions = Some(Err(error));
    }

    /// Queue the reply to the next upload (generic or submission-scoped)
    pub fn push_upload(&self, reply: Result<UploadReceipt, ApiError>) {
        self.state().uploads.push_back(reply);
    }

    /// Queue the reply to the next run request
    pub fn push_run(&self, reply: Result<RunReceipt, ApiError>) {
        self.state().runs.push_back(reply);
    }

    /// Queue the reply to the next status poll for a job
    pub fn push_status(&self, job_id: &JobId, reply: Result<StatusReport, ApiError>) {
        self.state()
            .statuses
            .entry(job_id.clone())
            .or_default()
            .push_back(reply);
    }

    pub fn set_jobs(&self, jobs: Vec<JobSummary>) {
        self.state().jobs = jobs;
    }

    pub fn fail_jobs(&self, error: ApiError) {
        self.state().jobs_error = Some(error);
    }

    pub fn set_authenticated(&self, authenticated: bool) {
        self.state().authenticated = authenticated;
    }

    pub fn set_user(&self, username: impl Into<String>) {
        self.state().user = Some(UserInfo {
            username: username.into(),
        });
    }

    /// Make session checks (`check_auth`, `current_user`) fail
    pub fn fail_auth_check(&self, error: ApiError) {
        self.state().auth_error = Some(error);
    }

    pub fn fail_login(&self, error: ApiError) {
        self.state().login_error = Some(error);
    }

    /// Hold every subsequent status reply until released through the gate
    pub fn hold_polls(&self) -> PollGate {
        let gate = PollGate {
            permits: Arc::new(Semaphore::new(0)),
        };
        self.state().gate = Some(gate.clone());
        gate
    }
}

fn names(files: &[UploadFile]) -> Vec<String> {
    files.iter().map(|f| f.name.clone()).collect()
}

#[async_trait]
impl DashboardApi for FakeDashboardApi {
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>, ApiError> {
        self.record(ApiCall::ListPipelines);
        self.state().pipelines.clone().unwrap_or(Ok(Vec::new()))
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, ApiError> {
        self.record(ApiCall::ListSubmissions);
        self.state().submissions.clone().unwrap_or(Ok(Vec::new()))
    }

    async fn upload(&self, files: &[UploadFile]) -> Result<UploadReceipt, ApiError> {
        self.record(ApiCall::Upload {
            filenames: names(files),
        });
        let scripted = self.state().uploads.pop_front();
        scripted.unwrap_or_else(|| {
            Ok(UploadReceipt {
                job_id: JobId::from("job-1"),
                filenames: names(files),
            })
        })
    }

    async fn create_submission_job(
        &self,
        submission_id: &SubmissionId,
        pipeline_id: &PipelineId,
        files: &[UploadFile],
    ) -> Result<UploadReceipt, ApiError> {
        self.record(ApiCall::CreateSubmissionJob {
            submission_id: submission_id.clone(),
            pipeline_id: pipeline_id.clone(),
            filenames: names(files),
        });
        let scripted = self.state().uploads.pop_front();
        scripted.unwrap_or_else(|| {
            Ok(UploadReceipt {
                job_id: JobId::from("job-1"),
                filenames: names(files),
            })
        })
    }

    async fn run_job(&self, request: &RunRequest) -> Result<RunReceipt, ApiError> {
        self.record(ApiCall::RunJob(request.clone()));
        let scripted = self.state().runs.pop_front();
        scripted.unwrap_or_else(|| Ok(RunReceipt::default()))
    }

    async fn job_status(&self, job_id: &JobId) -> Result<StatusReport, ApiError> {
        self.record(ApiCall::JobStatus {
            job_id: job_id.clone(),
        });

        let gate = self.state().gate.clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.permits.acquire().await {
                permit.forget();
            }
        }

        let scripted = self
            .state()
            .statuses
            .get_mut(job_id)
            .and_then(|replies| replies.pop_front());
        scripted.unwrap_or_else(|| Err(ApiError::rejected(404, "Job not found")))
    }

    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ApiError> {
        self.record(ApiCall::ListJobs);
        let state = self.state();
        match &state.jobs_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.jobs.clone()),
        }
    }

    async fn check_auth(&self) -> Result<bool, ApiError> {
        self.record(ApiCall::CheckAuth);
        let state = self.state();
        match &state.auth_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.authenticated),
        }
    }

    async fn current_user(&self) -> Result<UserInfo, ApiError> {
        self.record(ApiCall::CurrentUser);
        let state = self.state();
        if let Some(err) = &state.auth_error {
            return Err(err.clone());
        }
        match (&state.user, state.authenticated) {
            (Some(user), true) => Ok(user.clone()),
            _ => Err(ApiError::rejected(401, "Unauthorized")),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.record(ApiCall::Login {
            username: credentials.username.clone(),
        });
        let mut state = self.state();
        if let Some(err) = state.login_error.clone() {
            return Err(err);
        }
        state.authenticated = true;
        state.user = Some(UserInfo {
            username: credentials.username.clone(),
        });
        Ok(())
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.record(ApiCall::Register {
            username: registration.username.clone(),
        });
        let mut state = self.state();
        state.authenticated = true;
        state.user = Some(UserInfo {
            username: registration.username.clone(),
        });
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record(ApiCall::Logout);
        let mut state = self.state();
        state.authenticated = false;
        state.user = None;
        Ok(())
    }
}
