// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! pipedash-core: job submission and status tracking for the pipeline dashboard
//!
//! This crate provides:
//! - The pipeline/submission catalog and the selection gate in front of uploads
//! - The upload coordinator, which turns one batch of files into one job
//! - A pure job state machine and the async tracker that polls it to completion
//! - Event routing, status card rendering and configuration
//! - The `DashboardApi` seam to the backend (real client in `pipedash-adapters`)

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod events;
pub mod model;

pub mod auth;
pub mod catalog;
pub mod history;
pub mod selection;
pub mod upload;

// Job lifecycle (order matters for dependencies)
pub mod job;
pub mod timer;
pub mod tracker;

pub mod view;

#[cfg(test)]
mod test_support;

// Re-exports
pub use api::{ApiError, DashboardApi, RunReceipt, RunRequest, StatusReport, UploadReceipt, UserInfo};
pub use auth::AuthGate;
pub use catalog::PipelineCatalog;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, DashboardConfig};
pub use error::{AuthError, FetchError, PollError, PreconditionError, SubmitError, UploadError};
pub use event::Event;
pub use events::{EventBus, EventPattern, EventReceiver, Subscription};
pub use history::JobHistory;
pub use job::{Job, JobEvent, CONNECTION_ERROR_TITLE};
pub use model::{
    JobId, JobSnapshot, JobStatus, JobSummary, Pipeline, PipelineId, Submission, SubmissionId,
    UploadFile,
};
pub use selection::{Selection, SelectionGate};
pub use timer::PollTimer;
pub use tracker::{JobTracker, TickOutcome};
pub use upload::UploadCoordinator;
pub use view::{StatusCard, StatusColor};
