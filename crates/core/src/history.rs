// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job history ("All jobs" listing)

use crate::api::DashboardApi;
use crate::error::FetchError;
use crate::model::JobSummary;
use serde::Serialize;
use std::fmt;

/// Previously created jobs, in the order the backend returns them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JobHistory {
    jobs: Vec<JobSummary>,
}

impl JobHistory {
    pub fn new(jobs: Vec<JobSummary>) -> Self {
        Self { jobs }
    }

    pub async fn load<A: DashboardApi>(api: &A) -> Result<Self, FetchError> {
        let jobs = api.list_jobs().await.map_err(|source| {
            tracing::warn!(error = %source, "job history unavailable");
            FetchError::Api {
                what: "jobs",
                source,
            }
        })?;
        tracing::debug!(jobs = jobs.len(), "job history loaded");
        Ok(Self { jobs })
    }

    pub fn jobs(&self) -> &[JobSummary] {
        &self.jobs
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl fmt::Display for JobHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.jobs.is_empty() {
            return write!(f, "No jobs found.");
        }
        write!(
            f,
            "{:<36} {:<10} {:<16} FILES",
            "JOB", "STATUS", "PIPELINE"
        )?;
        for job in &self.jobs {
            write!(f, "\n{}", job)?;
        }
        Ok(())
    }
}
