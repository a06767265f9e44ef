// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upload coordinator
//!
//! Turns a batch of dropped files into exactly one upload request and, on
//! success, exactly one [`JobTracker`]. Uploads are all-or-nothing and never
//! retried; a failed call leaves nothing behind.

use crate::api::{DashboardApi, RunReceipt, RunRequest, UploadReceipt};
use crate::clock::{Clock, SystemClock};
use crate::error::{PreconditionError, SubmitError, UploadError};
use crate::event::Event;
use crate::events::{EventBus, EventReceiver, Subscription};
use crate::job::Job;
use crate::model::{Pipeline, SubmissionId, UploadFile};
use crate::selection::SelectionGate;
use crate::tracker::JobTracker;
use std::time::{Duration, Instant};

/// Page-level owner of the upload flow
pub struct UploadCoordinator<A: DashboardApi, C: Clock = SystemClock> {
    api: A,
    clock: C,
    poll_interval: Duration,
    events: EventBus,
}

impl<A: DashboardApi> UploadCoordinator<A, SystemClock> {
    pub fn new(api: A, poll_interval: Duration) -> Self {
        Self::with_clock(api, SystemClock, poll_interval)
    }
}

impl<A: DashboardApi, C: Clock> UploadCoordinator<A, C> {
    pub fn with_clock(api: A, clock: C, poll_interval: Duration) -> Self {
        Self {
            api,
            clock,
            poll_interval,
            events: EventBus::new(),
        }
    }

    /// Subscribe to `upload:*` and `job:launched` events
    pub fn subscribe(&self, subscription: Subscription) -> EventReceiver {
        self.events.subscribe(subscription)
    }

    /// Upload `files` for the gate's current selection.
    ///
    /// Fails with [`PreconditionError`] before touching the network when the
    /// gate is closed or `files` is empty. Otherwise issues one multipart
    /// request and returns a tracker for the created job, still in
    /// `preparing`. The tracker is not started.
    pub async fn submit(
        &self,
        files: Vec<UploadFile>,
        gate: &SelectionGate,
    ) -> Result<JobTracker<A, C>, SubmitError> {
        let (pipeline, submission_id) = precondition(&files, gate)?;

        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        let started = Instant::now();
        tracing::info!(
            pipeline_id = %pipeline.id,
            submission_id = submission_id.as_ref().map(|s| s.as_str()),
            files = names.len(),
            "uploading"
        );

        let reply = match &submission_id {
            Some(submission_id) => {
                self.api
                    .create_submission_job(submission_id, &pipeline.id, &files)
                    .await
            }
            None => self.api.upload(&files).await,
        };

        let receipt = match reply {
            Ok(receipt) => receipt,
            Err(err) => {
                let err = UploadError::from_upload(err);
                tracing::warn!(
                    error = %err,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "upload failed"
                );
                self.events.publish(Event::UploadRejected {
                    message: err.to_string(),
                });
                return Err(err.into());
            }
        };

        let UploadReceipt { job_id, filenames } = receipt;
        // Older backends omit the echo; fall back to what was sent
        let filenames = if filenames.is_empty() { names } else { filenames };

        tracing::info!(
            job_id = %job_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upload accepted"
        );
        self.events.publish(Event::UploadAccepted {
            job_id: job_id.clone(),
            filenames: filenames.clone(),
        });

        let job = Job::new(job_id, filenames, &pipeline, submission_id, &self.clock);
        Ok(JobTracker::new(
            self.api.clone(),
            self.clock.clone(),
            job,
            self.poll_interval,
        ))
    }

    /// Ask the backend to run an uploaded job.
    ///
    /// The tracker is left untouched; on failure it stays in `preparing`.
    pub async fn launch(&self, tracker: &JobTracker<A, C>) -> Result<RunReceipt, UploadError> {
        let snapshot = tracker.snapshot();
        let request = RunRequest {
            job_id: snapshot.job_id,
            pipeline_id: snapshot.pipeline_id,
            submission_id: snapshot.submission_id,
        };

        match self.api.run_job(&request).await {
            Ok(receipt) => {
                tracing::info!(job_id = %request.job_id, "job launched");
                self.events.publish(Event::JobLaunched {
                    job_id: request.job_id,
                    command: receipt.docker_command_simulation.clone(),
                });
                Ok(receipt)
            }
            Err(err) => {
                let err = UploadError::from_run(err);
                tracing::warn!(job_id = %request.job_id, error = %err, "run request failed");
                Err(err)
            }
        }
    }

    /// Upload, launch, and start polling in one go
    pub async fn submit_and_start(
        &self,
        files: Vec<UploadFile>,
        gate: &SelectionGate,
    ) -> Result<JobTracker<A, C>, SubmitError> {
        let tracker = self.submit(files, gate).await?;
        self.launch(&tracker).await?;
        tracker.start();
        Ok(tracker)
    }
}

fn precondition(
    files: &[UploadFile],
    gate: &SelectionGate,
) -> Result<(Pipeline, Option<SubmissionId>), PreconditionError> {
    if !gate.is_ready() {
        return Err(PreconditionError::SelectionIncomplete);
    }
    if files.is_empty() {
        return Err(PreconditionError::NoFiles);
    }

    let selection = gate.selection();
    let pipeline = selection
        .pipeline
        .clone()
        .ok_or(PreconditionError::SelectionIncomplete)?;
    let submission_id = if gate.submission_mode() {
        let submission = selection
            .submission
            .as_ref()
            .ok_or(PreconditionError::SelectionIncomplete)?;
        Some(submission.id.clone())
    } else {
        None
    };
    Ok((pipeline, submission_id))
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
