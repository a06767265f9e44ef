// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture builders shared by unit tests

use crate::model::{IoSpec, Pipeline, PipelineId, Submission, SubmissionId};

/// A pipeline whose display name is derived from its id
pub fn pipeline(id: &str) -> Pipeline {
    Pipeline {
        id: PipelineId::from(id),
        name: format!("{} pipeline", id),
        description: String::new(),
        inputs: vec![IoSpec {
            name: "reads".to_string(),
            description: "Raw reads".to_string(),
            kind: "fastq".to_string(),
        }],
        outputs: Vec::new(),
    }
}

pub fn submission(id: &str) -> Submission {
    Submission {
        id: SubmissionId::from(id),
        name: format!("Batch {}", id),
        project_name: "Cohort study".to_string(),
        extracted_by: "lab".to_string(),
        submission_date: "2024-03-01".to_string(),
    }
}
