// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline and submission catalog
//!
//! Fetched once per page session and never mutated afterwards. A failed load
//! leaves the catalog empty; the caller decides whether to load again.

use crate::api::DashboardApi;
use crate::error::FetchError;
use crate::model::{Pipeline, PipelineId, Submission, SubmissionId};

/// Cache of what the backend offers
#[derive(Debug, Clone, Default)]
pub struct PipelineCatalog {
    submission_mode: bool,
    loaded: bool,
    pipelines: Vec<Pipeline>,
    submissions: Vec<Submission>,
}

impl PipelineCatalog {
    /// Empty catalog; in submission mode `load` also fetches submissions
    pub fn new(submission_mode: bool) -> Self {
        Self {
            submission_mode,
            ..Self::default()
        }
    }

    /// Fetch pipelines (and submissions in submission mode).
    ///
    /// All-or-nothing: if any request fails the catalog is left empty.
    pub async fn load<A: DashboardApi>(&mut self, api: &A) -> Result<(), FetchError> {
        self.clear();

        let pipelines = api.list_pipelines().await.map_err(|source| {
            tracing::warn!(error = %source, "pipeline list unavailable");
            FetchError::Api {
                what: "pipelines",
                source,
            }
        })?;

        let submissions = if self.submission_mode {
            api.list_submissions().await.map_err(|source| {
                tracing::warn!(error = %source, "submission list unavailable");
                FetchError::Api {
                    what: "submissions",
                    source,
                }
            })?
        } else {
            Vec::new()
        };

        tracing::info!(
            pipelines = pipelines.len(),
            submissions = submissions.len(),
            "catalog loaded"
        );

        self.pipelines = pipelines;
        self.submissions = submissions;
        self.loaded = true;
        Ok(())
    }

    fn clear(&mut self) {
        self.pipelines.clear();
        self.submissions.clear();
        self.loaded = false;
    }

    pub fn find_pipeline(&self, id: &PipelineId) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| &p.id == id)
    }

    pub fn find_submission(&self, id: &SubmissionId) -> Option<&Submission> {
        self.submissions.iter().find(|s| &s.id == id)
    }

    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// False until a load succeeds; dependent controls stay disabled meanwhile
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn submission_mode(&self) -> bool {
        self.submission_mode
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
