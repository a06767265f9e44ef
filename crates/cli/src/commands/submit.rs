// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submit files and follow job status

use super::{Api, Session};
use crate::error::DashError;
use clap::Args;
use pipedash_core::{
    DashboardConfig, EventPattern, Job, JobId, JobStatus, JobTracker, Pipeline, PipelineCatalog,
    PipelineId, PreconditionError, SelectionGate, StatusCard, StatusColor, SubmissionId,
    Subscription, SystemClock, UploadCoordinator, UploadFile,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args)]
pub struct SubmitArgs {
    /// Pipeline to run
    #[arg(long)]
    pub pipeline: Option<String>,

    /// Submission to scope the job to (required in submission mode)
    #[arg(long)]
    pub submission: Option<String>,

    /// Upload only; do not send the run request before tracking
    #[arg(long)]
    pub no_run: bool,

    /// Files to upload together as one job
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Job to follow
    pub job_id: String,

    /// Pipeline the job runs
    #[arg(long)]
    pub pipeline: String,
}

/// Gate check on the raw arguments; runs before any network call
pub fn check_arguments(args: &SubmitArgs, config: &DashboardConfig) -> Result<(), DashError> {
    let selection_complete =
        args.pipeline.is_some() && (!config.submission_mode || args.submission.is_some());
    if !selection_complete {
        return Err(PreconditionError::SelectionIncomplete.into());
    }
    if let (false, Some(id)) = (config.submission_mode, &args.submission) {
        return Err(DashError::submission_mode_off(id));
    }
    if args.files.is_empty() {
        return Err(PreconditionError::NoFiles.into());
    }
    Ok(())
}

async fn read_files(paths: &[PathBuf]) -> Result<Vec<UploadFile>, DashError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = UploadFile::from_path(path)
            .await
            .map_err(|e| DashError::unreadable_file(path, e))?;
        files.push(file);
    }
    Ok(files)
}

pub async fn submit(session: &Session, args: SubmitArgs) -> anyhow::Result<ExitCode> {
    let files = read_files(&args.files).await?;
    session.require_auth().await?;

    let submission_mode = session.config.submission_mode;
    let mut catalog = PipelineCatalog::new(submission_mode);
    catalog.load(&session.api).await.map_err(DashError::from)?;

    let mut gate = SelectionGate::new(submission_mode);
    if let Some(id) = &args.pipeline {
        let pipeline = catalog
            .find_pipeline(&PipelineId::from(id.as_str()))
            .ok_or_else(|| DashError::pipeline_not_found(id))?;
        gate.set_pipeline(Some(pipeline.clone()));
    }
    if let Some(id) = &args.submission {
        let submission = catalog
            .find_submission(&SubmissionId::from(id.as_str()))
            .ok_or_else(|| DashError::submission_not_found(id))?;
        gate.set_submission(Some(submission.clone()));
    }

    let coordinator = UploadCoordinator::new(session.api.clone(), session.config.poll_interval);
    let tracker = coordinator.submit(files, &gate).await.map_err(DashError::from)?;
    let snapshot = tracker.snapshot();
    println!(
        "Uploaded {} as job {}",
        snapshot.filenames.join(", "),
        snapshot.job_id
    );

    if !args.no_run {
        let receipt = coordinator.launch(&tracker).await.map_err(DashError::from)?;
        if let Some(command) = receipt.docker_command_simulation {
            println!("Command: {}", command);
        }
    }

    Ok(follow(tracker).await)
}

pub async fn status(session: &Session, args: StatusArgs) -> anyhow::Result<ExitCode> {
    session.require_auth().await?;

    let mut catalog = PipelineCatalog::new(false);
    catalog.load(&session.api).await.map_err(DashError::from)?;
    let pipeline_id = PipelineId::from(args.pipeline.as_str());
    let pipeline = catalog
        .find_pipeline(&pipeline_id)
        .cloned()
        .ok_or_else(|| DashError::pipeline_not_found(&args.pipeline))?;

    let tracker = attach(session, JobId::from(args.job_id), &pipeline);
    Ok(follow(tracker).await)
}

fn attach(session: &Session, job_id: JobId, pipeline: &Pipeline) -> JobTracker<Api> {
    let job = Job::new(job_id, Vec::new(), pipeline, None, &SystemClock);
    JobTracker::new(
        session.api.clone(),
        SystemClock,
        job,
        session.config.poll_interval,
    )
}

/// Poll until the job finishes (or Ctrl-C), printing a line per status change
async fn follow(tracker: JobTracker<Api>) -> ExitCode {
    let mut events = tracker.subscribe(Subscription::new(
        "cli",
        vec![EventPattern::new("job:*")],
    ));
    tracker.start();

    let colour = std::io::stdout().is_terminal();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    if let Some(snapshot) = event.snapshot() {
                        let line = StatusCard::render_line(snapshot);
                        if colour {
                            println!("{}", StatusColor::of(snapshot.status).paint(&line));
                        } else {
                            println!("{}", line);
                        }
                    }
                    if event.is_terminal() {
                        break;
                    }
                }
                None => break,
            },
            _ = &mut ctrl_c => {
                tracker.stop();
                eprintln!("stopped following job {}", tracker.job_id());
                break;
            }
        }
    }

    let snapshot = tracker.snapshot();
    println!();
    match tracker.elapsed() {
        Some(elapsed) => print!("{}", StatusCard::render_with_elapsed(&snapshot, elapsed)),
        None => print!("{}", StatusCard::render(&snapshot)),
    }
    if let Some(failure) = tracker.poll_error() {
        eprintln!("error: {}", failure);
    }

    match snapshot.status {
        JobStatus::Completed => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
