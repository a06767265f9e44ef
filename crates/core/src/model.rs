// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dashboard data model
//!
//! Pipelines and submissions are fetched once and never mutated. Jobs are
//! owned by their tracker; everything else sees a [`JobSnapshot`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Server-assigned pipeline identifier (the pipeline's directory name)
    PipelineId
);
string_id!(
    /// Server-assigned job identifier, handed out at upload time
    JobId
);

/// Submission identifier.
///
/// The backend uses integer primary keys; they are carried as text so the id
/// formats into URLs unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl<'de> Deserialize<'de> for SubmissionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => SubmissionId(n.to_string()),
            Raw::Text(s) => SubmissionId(s),
        })
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(s: &str) -> Self {
        SubmissionId(s.to_string())
    }
}

impl From<String> for SubmissionId {
    fn from(s: String) -> Self {
        SubmissionId(s)
    }
}

impl SubmissionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One declared input or output of a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A server-side processing workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: PipelineId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inputs: Vec<IoSpec>,
    #[serde(default)]
    pub outputs: Vec<IoSpec>,
}

/// A named batch of samples a job can be scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub extracted_by: String,
    #[serde(default)]
    pub submission_date: String,
}

impl Submission {
    /// Calendar date of the submission, if the wire string is recognizable.
    ///
    /// Accepts ISO dates, ISO date-times, and the RFC 2822 form Flask emits.
    pub fn submitted_on(&self) -> Option<NaiveDate> {
        let raw = self.submission_date.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        // Flask renders dates as "Mon, 01 Jan 2024 00:00:00 GMT"
        DateTime::parse_from_rfc2822(&raw.replace("GMT", "+0000"))
            .ok()
            .map(|dt| dt.date_naive())
    }
}

/// Lifecycle status of a submitted job.
///
/// Wire values are the lowercase variant names and round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Preparing,
    Running,
    Completed,
    Error,
}

impl JobStatus {
    /// Position in the lifecycle order `preparing < running < {completed, error}`.
    pub fn rank(self) -> u8 {
        match self {
            JobStatus::Preparing => 0,
            JobStatus::Running => 1,
            JobStatus::Completed | JobStatus::Error => 2,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Preparing => "preparing",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for JobStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preparing" => Ok(JobStatus::Preparing),
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "error" => Ok(JobStatus::Error),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A file staged for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, naming the part after the file name
    pub async fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// Read-only view of a job, handed to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSnapshot {
    pub job_id: JobId,
    pub filenames: Vec<String>,
    pub pipeline_id: PipelineId,
    pub pipeline_name: String,
    pub submission_id: Option<SubmissionId>,
    pub status: JobStatus,
    pub progress: u8,
    pub process_title: String,
}

/// One uploaded file as recorded in the job history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFile {
    pub original_filename: String,
}

/// An entry of the job history listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: JobId,
    #[serde(default)]
    pub files: Vec<JobFile>,
    /// Free text: the backend also reports states such as `uploaded`
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub pipeline: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl fmt::Display for JobSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = if self.files.is_empty() {
            "N/A".to_string()
        } else {
            self.files
                .iter()
                .map(|f| f.original_filename.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "{:<36} {:<10} {:<16} {}",
            self.id,
            if self.status.is_empty() { "N/A" } else { &self.status },
            self.pipeline.as_deref().unwrap_or("N/A"),
            files
        )
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
