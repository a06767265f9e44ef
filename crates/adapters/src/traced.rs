// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced backend wrapper for consistent observability

use async_trait::async_trait;
use pipedash_core::api::{
    ApiError, Credentials, DashboardApi, Registration, RunReceipt, RunRequest, StatusReport,
    UploadReceipt, UserInfo,
};
use pipedash_core::{JobId, JobSummary, Pipeline, PipelineId, Submission, SubmissionId, UploadFile};
use std::future::Future;
use std::time::Instant;
use tracing::Instrument;

/// Wrapper that adds a span, timing and outcome logging to any [`DashboardApi`]
#[derive(Clone)]
pub struct TracedDashboardApi<A> {
    inner: A,
}

impl<A> TracedDashboardApi<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

/// Run `call` inside `span`, logging elapsed time and failures.
///
/// Status polls are frequent, so successes log at debug; failures always warn.
async fn observe<T, F>(span: tracing::Span, call: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    async move {
        let start = Instant::now();
        let result = call.await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(elapsed_ms, "ok"),
            Err(ApiError::Rejected { status, message }) => {
                tracing::warn!(elapsed_ms, status, message = %message, "rejected")
            }
            Err(e) => tracing::warn!(elapsed_ms, error = %e, "failed"),
        }
        result
    }
    .instrument(span)
    .await
}

#[async_trait]
impl<A: DashboardApi> DashboardApi for TracedDashboardApi<A> {
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>, ApiError> {
        let span = tracing::info_span!("api.list_pipelines");
        let result = observe(span.clone(), self.inner.list_pipelines()).await;
        if let Ok(pipelines) = &result {
            span.in_scope(|| tracing::info!(count = pipelines.len(), "pipelines listed"));
        }
        result
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, ApiError> {
        let span = tracing::info_span!("api.list_submissions");
        observe(span, self.inner.list_submissions()).await
    }

    async fn upload(&self, files: &[UploadFile]) -> Result<UploadReceipt, ApiError> {
        let bytes: usize = files.iter().map(|f| f.bytes.len()).sum();
        let span = tracing::info_span!("api.upload", files = files.len(), bytes);
        span.in_scope(|| tracing::info!("uploading"));
        let result = observe(span.clone(), self.inner.upload(files)).await;
        if let Ok(receipt) = &result {
            span.in_scope(|| tracing::info!(job_id = %receipt.job_id, "upload accepted"));
        }
        result
    }

    async fn create_submission_job(
        &self,
        submission_id: &SubmissionId,
        pipeline_id: &PipelineId,
        files: &[UploadFile],
    ) -> Result<UploadReceipt, ApiError> {
        let span = tracing::info_span!(
            "api.create_submission_job",
            submission_id = %submission_id,
            pipeline_id = %pipeline_id,
            files = files.len()
        );
        span.in_scope(|| tracing::info!("uploading"));
        let result = observe(
            span.clone(),
            self.inner
                .create_submission_job(submission_id, pipeline_id, files),
        )
        .await;
        if let Ok(receipt) = &result {
            span.in_scope(|| tracing::info!(job_id = %receipt.job_id, "upload accepted"));
        }
        result
    }

    async fn run_job(&self, request: &RunRequest) -> Result<RunReceipt, ApiError> {
        let span = tracing::info_span!(
            "api.run_job",
            job_id = %request.job_id,
            pipeline_id = %request.pipeline_id
        );
        observe(span, self.inner.run_job(request)).await
    }

    async fn job_status(&self, job_id: &JobId) -> Result<StatusReport, ApiError> {
        let span = tracing::debug_span!("api.job_status", job_id = %job_id);
        let result = observe(span.clone(), self.inner.job_status(job_id)).await;
        if let Ok(report) = &result {
            span.in_scope(|| {
                tracing::trace!(status = %report.status, progress = report.progress, "polled")
            });
        }
        result
    }

    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ApiError> {
        observe(tracing::info_span!("api.list_jobs"), self.inner.list_jobs()).await
    }

    async fn check_auth(&self) -> Result<bool, ApiError> {
        let span = tracing::debug_span!("api.check_auth");
        let result = observe(span.clone(), self.inner.check_auth()).await;
        span.in_scope(|| tracing::trace!(authenticated = ?result.as_ref().ok(), "checked"));
        result
    }

    async fn current_user(&self) -> Result<UserInfo, ApiError> {
        observe(tracing::debug_span!("api.current_user"), self.inner.current_user()).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        // Never log the password
        let span = tracing::info_span!("api.login", username = %credentials.username);
        observe(span, self.inner.login(credentials)).await
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let span = tracing::info_span!("api.register", username = %registration.username);
        observe(span, self.inner.register(registration)).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        observe(tracing::info_span!("api.logout"), self.inner.logout()).await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
