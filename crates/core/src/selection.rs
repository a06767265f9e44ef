// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Selection gate
//!
//! Tracks the user's pipeline/submission choice for one submission page and
//! answers whether files may be submitted yet.

use crate::model::{Pipeline, Submission};
use std::fmt;

/// The user's current choice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub pipeline: Option<Pipeline>,
    pub submission: Option<Submission>,
}

type ReadyListener = Box<dyn FnMut(bool) + Send>;

/// Gate in front of the drop zone
pub struct SelectionGate {
    submission_mode: bool,
    selection: Selection,
    listener: Option<ReadyListener>,
}

impl SelectionGate {
    pub fn new(submission_mode: bool) -> Self {
        Self {
            submission_mode,
            selection: Selection::default(),
            listener: None,
        }
    }

    /// Register the single subscriber (the drop-zone toggle).
    ///
    /// Replaces any previous subscriber. It is called synchronously after
    /// every setter with the freshly computed readiness.
    pub fn on_change(&mut self, listener: impl FnMut(bool) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn set_pipeline(&mut self, pipeline: Option<Pipeline>) {
        self.selection.pipeline = pipeline;
        self.notify();
    }

    pub fn set_submission(&mut self, submission: Option<Submission>) {
        self.selection.submission = submission;
        self.notify();
    }

    /// Pipeline chosen, and a submission too when submission mode is on
    pub fn is_ready(&self) -> bool {
        self.selection.pipeline.is_some()
            && (!self.submission_mode || self.selection.submission.is_some())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn submission_mode(&self) -> bool {
        self.submission_mode
    }

    fn notify(&mut self) {
        let ready = self.is_ready();
        tracing::debug!(ready, "selection changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(ready);
        }
    }
}

impl fmt::Debug for SelectionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionGate")
            .field("submission_mode", &self.submission_mode)
            .field("selection", &self.selection)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
