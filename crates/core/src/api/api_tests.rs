// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn upload_receipt_accepts_both_id_spellings() {
    let camel: UploadReceipt =
        serde_json::from_str(r#"{"jobId": "abc-123", "filenames": ["x.fastq"]}"#).unwrap();
    let snake: UploadReceipt = serde_json::from_str(r#"{"job_id": "abc-123"}"#).unwrap();
    assert_eq!(camel.job_id, JobId::from("abc-123"));
    assert_eq!(camel.filenames, vec!["x.fastq".to_string()]);
    assert_eq!(snake.job_id, camel.job_id);
    assert!(snake.filenames.is_empty());
}

#[test]
fn run_request_omits_missing_submission() {
    let request = RunRequest {
        job_id: JobId::from("j"),
        pipeline_id: PipelineId::from("p"),
        submission_id: None,
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, serde_json::json!({"jobId": "j", "pipelineId": "p"}));

    let scoped = RunRequest {
        submission_id: Some(SubmissionId::from("4")),
        ..request
    };
    let json = serde_json::to_value(&scoped).unwrap();
    assert_eq!(json["submissionId"], "4");
}

#[test]
fn status_report_decodes_poll_reply() {
    let report: StatusReport = serde_json::from_str(
        r#"{"status": "running", "progress": 10, "process_title": "Aligning"}"#,
    )
    .unwrap();
    assert_eq!(report, StatusReport::new(JobStatus::Running, 10, "Aligning"));
}

#[test]
fn status_report_truncates_float_progress_into_range() {
    let report: StatusReport =
        serde_json::from_str(r#"{"status": "running", "progress": 42.9}"#).unwrap();
    assert_eq!(report.progress, 42);

    let report: StatusReport =
        serde_json::from_str(r#"{"status": "completed", "progress": 180}"#).unwrap();
    assert_eq!(report.progress, 100);
}

#[test]
fn status_report_reads_null_progress_and_title_as_empty() {
    let report: StatusReport = serde_json::from_str(
        r#"{"status": "running", "progress": null, "process_title": null}"#,
    )
    .unwrap();
    assert_eq!(report, StatusReport::new(JobStatus::Running, 0, ""));

    let report: StatusReport = serde_json::from_str(
        r#"{"status": "running", "progress": 10, "process_title": null}"#,
    )
    .unwrap();
    assert_eq!(report, StatusReport::new(JobStatus::Running, 10, ""));
}

#[test]
fn status_report_rejects_unknown_status() {
    let result =
        serde_json::from_str::<StatusReport>(r#"{"status": "queued", "progress": 0}"#);
    assert!(result.is_err());
}

#[test]
fn rejected_error_displays_server_message_verbatim() {
    let err = ApiError::rejected(400, "No files selected");
    assert_eq!(err.to_string(), "No files selected");
    assert_eq!(err.status(), Some(400));
    assert!(!err.is_unauthorized());
    assert!(ApiError::rejected(401, "login").is_unauthorized());
    assert_eq!(ApiError::Network("refused".into()).status(), None);
}
