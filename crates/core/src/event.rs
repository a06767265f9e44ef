// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events emitted by the upload coordinator and job trackers

use crate::model::{JobId, JobSnapshot};
use serde::Serialize;

/// Something subscribers may want to render or log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Upload accepted; a tracker now exists for the job
    UploadAccepted {
        job_id: JobId,
        filenames: Vec<String>,
    },
    /// Upload failed; no job exists
    UploadRejected { message: String },
    /// Backend accepted the run request for a job
    JobLaunched {
        job_id: JobId,
        command: Option<String>,
    },
    /// A poll result (or a forced failure) was applied to a job
    StatusChanged(JobSnapshot),
}

impl Event {
    /// Routing name used by subscription patterns
    pub fn name(&self) -> String {
        match self {
            Event::UploadAccepted { .. } => "upload:accepted".to_string(),
            Event::UploadRejected { .. } => "upload:rejected".to_string(),
            Event::JobLaunched { .. } => "job:launched".to_string(),
            Event::StatusChanged(snapshot) => format!("job:{}", snapshot.status),
        }
    }

    /// Snapshot carried by a status change
    pub fn snapshot(&self) -> Option<&JobSnapshot> {
        match self {
            Event::StatusChanged(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.snapshot().is_some_and(|s| s.status.is_terminal())
    }
}
