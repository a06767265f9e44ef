// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job state machine
//!
//! A job moves `preparing -> running -> completed | error`, and may jump
//! straight from `preparing` to `error` when the first poll fails. Status never
//! moves backwards and both terminal states absorb every later event, so a
//! poll reply that arrives after the job finished cannot reopen it.

use crate::api::StatusReport;
use crate::clock::Clock;
use crate::event::Event;
use crate::model::{JobId, JobSnapshot, JobStatus, Pipeline, PipelineId, SubmissionId};
use std::time::{Duration, Instant};

/// Process title shown when the status endpoint cannot be reached
pub const CONNECTION_ERROR_TITLE: &str = "Connection error: could not fetch job status";

/// Inputs to the job state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    /// Backend accepted the job; polling begins
    Start,
    /// A status poll succeeded
    Polled(StatusReport),
    /// A status poll failed (non-2xx or transport error)
    PollFailed { reason: String },
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Emit(Event),
    /// Stop polling for good
    CancelPolling,
}

/// A submitted job as seen by its tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub job_id: JobId,
    pub filenames: Vec<String>,
    pub pipeline_id: PipelineId,
    pub pipeline_name: String,
    pub submission_id: Option<SubmissionId>,
    pub status: JobStatus,
    pub progress: u8,
    pub process_title: String,
    /// Number of running-state polls whose progress went down
    pub progress_regressions: u32,
    pub created_at: Instant,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
}

impl Job {
    /// Create a job in the `preparing` state
    pub fn new(
        job_id: JobId,
        filenames: Vec<String>,
        pipeline: &Pipeline,
        submission_id: Option<SubmissionId>,
        clock: &impl Clock,
    ) -> Self {
        Job {
            job_id,
            filenames,
            pipeline_id: pipeline.id.clone(),
            pipeline_name: pipeline.name.clone(),
            submission_id,
            status: JobStatus::Preparing,
            progress: 0,
            process_title: String::new(),
            progress_regressions: 0,
            created_at: clock.now(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Pure transition function - returns new state and effects
    pub fn transition(&self, event: JobEvent, clock: &impl Clock) -> (Job, Vec<Effect>) {
        if self.is_terminal() {
            tracing::debug!(job_id = %self.job_id, ?event, "ignoring event for finished job");
            return (self.clone(), vec![]);
        }

        let now = clock.now();

        match event {
            // Preparing → Running
            JobEvent::Start if self.status == JobStatus::Preparing => {
                let job = Job {
                    status: JobStatus::Running,
                    started_at: Some(now),
                    ..self.clone()
                };
                let effects = vec![Effect::Emit(Event::StatusChanged(job.snapshot()))];
                (job, effects)
            }

            JobEvent::Start => (self.clone(), vec![]),

            JobEvent::Polled(report) => {
                let status = if report.status.rank() < self.status.rank() {
                    tracing::warn!(
                        job_id = %self.job_id,
                        current = %self.status,
                        reported = %report.status,
                        "backend reported an earlier status; keeping current"
                    );
                    self.status
                } else {
                    report.status
                };

                let regressed = self.status == JobStatus::Running
                    && status == JobStatus::Running
                    && report.progress < self.progress;
                if regressed {
                    tracing::warn!(
                        job_id = %self.job_id,
                        from = self.progress,
                        to = report.progress,
                        "progress went backwards"
                    );
                }

                let job = Job {
                    status,
                    progress: report.progress,
                    process_title: report.process_title,
                    progress_regressions: self.progress_regressions + u32::from(regressed),
                    started_at: self.started_at.or(Some(now)),
                    finished_at: status.is_terminal().then_some(now),
                    ..self.clone()
                };
                let mut effects = vec![Effect::Emit(Event::StatusChanged(job.snapshot()))];
                if status.is_terminal() {
                    effects.push(Effect::CancelPolling);
                }
                (job, effects)
            }

            // Any non-terminal → Error
            JobEvent::PollFailed { reason } => {
                tracing::warn!(job_id = %self.job_id, reason = %reason, "status poll failed");
                let job = Job {
                    status: JobStatus::Error,
                    process_title: CONNECTION_ERROR_TITLE.to_string(),
                    finished_at: Some(now),
                    ..self.clone()
                };
                let effects = vec![
                    Effect::Emit(Event::StatusChanged(job.snapshot())),
                    Effect::CancelPolling,
                ];
                (job, effects)
            }
        }
    }

    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            job_id: self.job_id.clone(),
            filenames: self.filenames.clone(),
            pipeline_id: self.pipeline_id.clone(),
            pipeline_name: self.pipeline_name.clone(),
            submission_id: self.submission_id.clone(),
            status: self.status,
            progress: self.progress,
            process_title: self.process_title.clone(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Time spent since the job started, frozen once it finishes
    pub fn elapsed(&self, clock: &impl Clock) -> Option<Duration> {
        let started = self.started_at?;
        let end = self.finished_at.unwrap_or_else(|| clock.now());
        Some(end.saturating_duration_since(started))
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
