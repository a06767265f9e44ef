//! Catalog listing specs
//!
//! Pipelines and submissions are listed from the backend as tables or JSON.

use crate::prelude::*;

#[test]
fn pipelines_are_listed_with_inputs() {
    let temp = Project::empty();
    let backend = Backend::start(&[("GET /api/pipelines", 200, PIPELINES)]);
    temp.pipedash()
        .backend(&backend)
        .args(&["pipelines"])
        .passes()
        .stdout_has("rna-seq")
        .stdout_has("RNA-Seq Analysis")
        .stdout_has("reads")
        .stdout_has("variant-calling");
}

#[test]
fn pipelines_as_json_keep_wire_shape() {
    let temp = Project::empty();
    let backend = Backend::start(&[("GET /api/pipelines", 200, PIPELINES)]);
    let run = temp
        .pipedash()
        .backend(&backend)
        .args(&["pipelines", "--json"])
        .passes();
    let value: serde_json::Value = serde_json::from_str(&run.stdout).unwrap();
    assert_eq!(value[0]["id"], "rna-seq");
    assert_eq!(value[0]["inputs"][0]["type"], "fastq");
}

#[test]
fn empty_catalog_says_so() {
    let temp = Project::empty();
    let backend = Backend::start(&[("GET /api/pipelines", 200, "[]")]);
    temp.pipedash()
        .backend(&backend)
        .args(&["pipelines"])
        .passes()
        .stdout_has("No pipelines");
}

#[test]
fn submissions_show_parsed_dates() {
    let temp = Project::empty();
    let backend = Backend::start(&[
        ("GET /api/pipelines", 200, PIPELINES),
        ("GET /api/submissions", 200, SUBMISSIONS),
    ]);
    temp.pipedash()
        .backend(&backend)
        .args(&["submissions"])
        .passes()
        .stdout_has("Batch 7")
        .stdout_has("Liver")
        .stdout_has("2024-03-01");
}

#[test]
fn failed_catalog_request_surfaces_server_text() {
    let temp = Project::empty();
    let backend = Backend::start(&[(
        "GET /api/pipelines",
        500,
        r#"{"error": "pipeline directory missing"}"#,
    )]);
    temp.pipedash()
        .backend(&backend)
        .args(&["pipelines"])
        .fails()
        .stderr_has("pipeline directory missing");
}
