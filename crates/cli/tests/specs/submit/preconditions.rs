//! Submit precondition specs
//!
//! An incomplete selection or an empty file list fails locally; the backend
//! is never contacted.

use crate::prelude::*;

#[test]
fn missing_pipeline_fails_without_network() {
    let temp = Project::empty();
    temp.file("reads.fastq", "ACGT\n");
    temp.pipedash()
        .args(&["--url", &dead_url(), "submit", "reads.fastq"])
        .fails()
        .stderr_has("select pipeline/submission first")
        .stderr_has("--pipeline");
}

#[test]
fn missing_submission_in_submission_mode_fails() {
    let temp = Project::empty();
    temp.file("reads.fastq", "ACGT\n");
    temp.pipedash()
        .args(&["--url", &dead_url(), "submit", "--pipeline", "rna-seq", "reads.fastq"])
        .fails()
        .stderr_has("select pipeline/submission first");
}

#[test]
fn generic_mode_needs_no_submission_but_needs_files() {
    let temp = Project::empty();
    temp.pipedash()
        .env("PIPEDASH_SUBMISSION_MODE", "0")
        .args(&["--url", &dead_url(), "submit", "--pipeline", "rna-seq"])
        .fails()
        .stderr_has("no files to upload");
}

#[test]
fn precondition_failure_sends_no_requests() {
    let temp = Project::empty();
    let backend = Backend::completing_job("j-1");
    temp.pipedash()
        .backend(&backend)
        .args(&["submit", "--pipeline", "rna-seq", "--submission", "7"])
        .fails()
        .stderr_has("no files to upload");
    assert!(backend.requests().is_empty(), "{:?}", backend.requests());
}

#[test]
fn unknown_pipeline_points_at_listing() {
    let temp = Project::empty();
    temp.file("reads.fastq", "ACGT\n");
    let backend = Backend::completing_job("j-1");
    temp.pipedash()
        .backend(&backend)
        .args(&[
            "submit",
            "--pipeline",
            "chip-seq",
            "--submission",
            "7",
            "reads.fastq",
        ])
        .fails()
        .stderr_has("Pipeline 'chip-seq' not found")
        .stderr_has("pipedash pipelines");
}

#[test]
fn unreadable_file_is_named() {
    let temp = Project::empty();
    temp.pipedash()
        .args(&[
            "--url",
            &dead_url(),
            "submit",
            "--pipeline",
            "rna-seq",
            "--submission",
            "7",
            "missing.fastq",
        ])
        .fails()
        .stderr_has("could not read missing.fastq");
}

#[test]
fn submission_flag_without_submission_mode_is_refused() {
    let temp = Project::empty();
    temp.file("reads.fastq", "ACGT\n");
    let backend = Backend::completing_job("j-1");
    temp.pipedash()
        .backend(&backend)
        .env("PIPEDASH_SUBMISSION_MODE", "0")
        .args(&[
            "submit",
            "--pipeline",
            "rna-seq",
            "--submission",
            "7",
            "reads.fastq",
        ])
        .fails()
        .stderr_has("submission mode is off");
    assert!(backend.requests().is_empty(), "{:?}", backend.requests());
}
