// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for dashboard operations
//!
//! Every error is terminal to the operation that raised it. None trigger an
//! automatic retry; the caller decides whether to invoke the operation again.

use crate::api::ApiError;
use thiserror::Error;

/// Catalog could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("could not load {what}: {source}")]
    Api {
        what: &'static str,
        #[source]
        source: ApiError,
    },
}

/// Client-side gate violated; no network call was made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("select pipeline/submission first")]
    SelectionIncomplete,
    #[error("no files to upload")]
    NoFiles,
}

/// The upload (or the run request that follows it) failed; no job was created
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Server rejected the upload; message is the body's `error` field verbatim
    #[error("{0}")]
    Rejected(String),
    /// Server refused to start the uploaded job
    #[error("{0}")]
    RunRejected(String),
    #[error("A network error occurred during upload. Is the server running?")]
    Network,
    #[error("unexpected upload response: {0}")]
    Decode(String),
}

impl UploadError {
    pub(crate) fn from_upload(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { message, .. } => UploadError::Rejected(message),
            ApiError::Network(_) => UploadError::Network,
            ApiError::Decode(detail) => UploadError::Decode(detail),
        }
    }

    pub(crate) fn from_run(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { message, .. } => UploadError::RunRejected(message),
            ApiError::Network(_) => UploadError::Network,
            ApiError::Decode(detail) => UploadError::Decode(detail),
        }
    }
}

/// Status fetch failed; the job has been forced to `error`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status poll for job {job_id} failed: {source}")]
pub struct PollError {
    pub job_id: String,
    #[source]
    pub source: ApiError,
}

/// Session is not valid; the caller must send the user to the login page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("not logged in")]
    NotAuthenticated,
    /// Registration form check; no request was sent
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("{0}")]
    Rejected(String),
    #[error("could not reach the server: {0}")]
    Unreachable(String),
}

/// Everything `UploadCoordinator::submit` can fail with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    Upload(#[from] UploadError),
}
