//! Submit and status tracking specs
//!
//! Upload, launch, then poll until the job reaches a terminal state.

use crate::prelude::*;

#[test]
fn submission_job_runs_to_completion() {
    let temp = Project::empty();
    temp.file("reads.fastq", "@r1\nACGT\n+\nIIII\n");
    let backend = Backend::completing_job("j-1");

    temp.pipedash()
        .backend(&backend)
        .env("PIPEDASH_POLL_INTERVAL_MS", "20")
        .args(&[
            "submit",
            "--pipeline",
            "rna-seq",
            "--submission",
            "7",
            "reads.fastq",
        ])
        .passes()
        .stdout_has("Uploaded reads.fastq as job j-1")
        .stdout_has("Command: docker run rna-seq")
        .stdout_has("Completed")
        .stdout_has("100%")
        .stdout_has("Pipeline finished");

    let requests = backend.requests();
    assert!(requests.contains(&"POST /api/submissions/7/create-job".to_string()));
    assert!(requests.contains(&"POST /api/run-job".to_string()));
    assert!(!requests.contains(&"POST /api/upload".to_string()));
}

#[test]
fn generic_upload_skips_run_request_with_no_run() {
    let temp = Project::empty();
    temp.file("reads.fastq", "ACGT\n");
    let backend = Backend::completing_job("j-2");

    temp.pipedash()
        .backend(&backend)
        .env("PIPEDASH_SUBMISSION_MODE", "false")
        .env("PIPEDASH_POLL_INTERVAL_MS", "20")
        .args(&["submit", "--pipeline", "rna-seq", "--no-run", "reads.fastq"])
        .passes()
        .stdout_has("as job j-2")
        .stdout_lacks("Command:");

    let requests = backend.requests();
    assert!(requests.contains(&"POST /api/upload".to_string()));
    assert!(!requests.contains(&"POST /api/run-job".to_string()));
}

#[test]
fn rejected_upload_shows_server_message() {
    let temp = Project::empty();
    temp.file("reads.fastq", "ACGT\n");
    let backend = Backend::start(&[
        ("GET /api/check-auth", 200, r#"{"is_authenticated": true}"#),
        ("GET /api/pipelines", 200, PIPELINES),
        ("GET /api/submissions", 200, SUBMISSIONS),
        (
            "POST /api/submissions/7/create-job",
            400,
            r#"{"error": "No selected file"}"#,
        ),
    ]);

    temp.pipedash()
        .backend(&backend)
        .args(&[
            "submit",
            "--pipeline",
            "rna-seq",
            "--submission",
            "7",
            "reads.fastq",
        ])
        .fails()
        .stderr_has("No selected file");
}

#[test]
fn failed_poll_ends_in_error_with_exit_failure() {
    let temp = Project::empty();
    let backend = Backend::start(&[
        ("GET /api/check-auth", 200, r#"{"is_authenticated": true}"#),
        ("GET /api/pipelines", 200, PIPELINES),
        ("GET /api/job-status/j-9", 404, r#"{"error": "Job not found"}"#),
    ]);

    temp.pipedash()
        .backend(&backend)
        .env("PIPEDASH_POLL_INTERVAL_MS", "20")
        .args(&["status", "j-9", "--pipeline", "rna-seq"])
        .fails()
        .stdout_has("Error")
        .stdout_has("Connection error")
        .stderr_has("Job not found");
}

#[test]
fn status_attaches_to_existing_job() {
    let temp = Project::empty();
    let backend = Backend::completing_job("j-3");

    temp.pipedash()
        .backend(&backend)
        .env("PIPEDASH_POLL_INTERVAL_MS", "20")
        .args(&["status", "j-3", "--pipeline", "rna-seq"])
        .passes()
        .stdout_has("Job j-3 (RNA-Seq Analysis)")
        .stdout_has("Completed");
}
