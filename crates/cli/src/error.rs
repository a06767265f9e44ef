// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use pipedash_adapters::HttpSetupError;
use pipedash_core::{
    AuthError, ConfigError, FetchError, PreconditionError, SubmitError, UploadError,
};
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct DashError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DashError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for DashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for DashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl DashError {
    pub fn pipeline_not_found(pipeline_id: &str) -> Self {
        DashError::new(format!("Pipeline '{}' not found", pipeline_id))
            .with_suggestion("List available pipelines: pipedash pipelines")
    }

    pub fn submission_not_found(submission_id: &str) -> Self {
        DashError::new(format!("Submission '{}' not found", submission_id))
            .with_suggestion("List submissions: pipedash submissions")
    }

    pub fn submission_mode_off(submission_id: &str) -> Self {
        DashError::new(format!(
            "--submission {} given but submission mode is off",
            submission_id
        ))
        .with_context("Without submission mode the job is uploaded unscoped")
        .with_suggestion("Drop --submission, or set PIPEDASH_SUBMISSION_MODE=1")
    }

    pub fn not_logged_in() -> Self {
        DashError::new("not logged in")
            .with_context("The backend requires a signed-in session for this command")
            .with_suggestion(
                "Pass credentials: pipedash --username NAME --password PASS <command>",
            )
            .with_suggestion("Or set PIPEDASH_USERNAME and PIPEDASH_PASSWORD")
    }

    pub fn unreachable(detail: &str) -> Self {
        DashError::new("could not reach the server")
            .with_context(detail.to_string())
            .with_suggestion("Check that the backend is running")
            .with_suggestion("Point at another server: pipedash --url http://HOST:PORT ...")
    }

    pub fn unreadable_file(path: &std::path::Path, err: std::io::Error) -> Self {
        DashError::new(format!("could not read {}", path.display()))
            .with_context(err.to_string())
            .with_source(err)
    }
}

impl From<PreconditionError> for DashError {
    fn from(err: PreconditionError) -> Self {
        let hint = match err {
            PreconditionError::SelectionIncomplete => {
                "Pass --pipeline ID, and --submission ID when submission mode is on"
            }
            PreconditionError::NoFiles => "Pass one or more files to upload",
        };
        DashError::new(err.to_string())
            .with_suggestion(hint)
            .with_source(err)
    }
}

impl From<UploadError> for DashError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Network => DashError::new(err.to_string())
                .with_suggestion("Check that the backend is running"),
            UploadError::RunRejected(_) => DashError::new(format!("job was not started: {}", err))
                .with_context("The files were uploaded but the backend refused to run the job"),
            _ => DashError::new(err.to_string()),
        }
    }
}

impl From<SubmitError> for DashError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Precondition(e) => e.into(),
            SubmitError::Upload(e) => e.into(),
        }
    }
}

impl From<AuthError> for DashError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated => DashError::not_logged_in(),
            AuthError::Unreachable(detail) => DashError::unreachable(&detail),
            other => DashError::new(other.to_string()),
        }
    }
}

impl From<FetchError> for DashError {
    fn from(err: FetchError) -> Self {
        let FetchError::Api { source, .. } = &err;
        let message = err.to_string();
        if source.is_unauthorized() {
            return DashError::not_logged_in();
        }
        match source {
            pipedash_core::ApiError::Network(detail) => {
                DashError::unreachable(detail).with_context(message)
            }
            _ => DashError::new(message),
        }
    }
}

impl From<ConfigError> for DashError {
    fn from(err: ConfigError) -> Self {
        DashError::new(err.to_string())
            .with_suggestion("Check pipedash.toml and PIPEDASH_* environment variables")
            .with_source(err)
    }
}

impl From<HttpSetupError> for DashError {
    fn from(err: HttpSetupError) -> Self {
        DashError::new(err.to_string())
            .with_suggestion("Use a URL such as http://127.0.0.1:5000")
            .with_source(err)
    }
}
