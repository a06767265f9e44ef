// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline and submission listings

use super::Session;
use crate::output::{print_list, OutputFormat};
use clap::Args;
use pipedash_core::{Pipeline, PipelineCatalog, Submission};
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct ListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(transparent)]
struct PipelineRow(Pipeline);

impl fmt::Display for PipelineRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.0;
        let inputs: Vec<&str> = p.inputs.iter().map(|i| i.name.as_str()).collect();
        write!(f, "{:<20} {:<28} {}", p.id, p.name, inputs.join(", "))
    }
}

#[derive(Serialize)]
#[serde(transparent)]
struct SubmissionRow(Submission);

impl fmt::Display for SubmissionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.0;
        let date = s
            .submitted_on()
            .map(|d| d.to_string())
            .unwrap_or_else(|| s.submission_date.clone());
        write!(
            f,
            "{:<6} {:<24} {:<20} {:<16} {}",
            s.id, s.name, s.project_name, s.extracted_by, date
        )
    }
}

pub async fn pipelines(session: &Session, args: ListArgs) -> anyhow::Result<()> {
    let mut catalog = PipelineCatalog::new(false);
    catalog.load(&session.api).await.map_err(crate::error::DashError::from)?;

    let rows: Vec<PipelineRow> = catalog.pipelines().iter().cloned().map(PipelineRow).collect();
    print_list(
        &rows,
        &format!("{:<20} {:<28} INPUTS", "ID", "NAME"),
        "No pipelines",
        OutputFormat::from_json_flag(args.json),
    );
    Ok(())
}

pub async fn submissions(session: &Session, args: ListArgs) -> anyhow::Result<()> {
    let mut catalog = PipelineCatalog::new(true);
    catalog.load(&session.api).await.map_err(crate::error::DashError::from)?;

    let rows: Vec<SubmissionRow> = catalog
        .submissions()
        .iter()
        .cloned()
        .map(SubmissionRow)
        .collect();
    print_list(
        &rows,
        &format!(
            "{:<6} {:<24} {:<20} {:<16} DATE",
            "ID", "NAME", "PROJECT", "EXTRACTED BY"
        ),
        "No submissions",
        OutputFormat::from_json_flag(args.json),
    );
    Ok(())
}
