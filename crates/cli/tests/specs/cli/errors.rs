//! CLI error specs
//!
//! Failures print a message with suggestions and exit non-zero.

use crate::prelude::*;

#[test]
fn unreachable_backend_suggests_checking_server() {
    let temp = Project::empty();
    temp.pipedash()
        .args(&["--url", &dead_url(), "pipelines"])
        .fails()
        .stderr_has("could not reach the server")
        .stderr_has("Check that the backend is running");
}

#[test]
fn invalid_url_is_reported_before_connecting() {
    let temp = Project::empty();
    temp.pipedash()
        .args(&["--url", "not a url", "pipelines"])
        .fails()
        .stderr_has("error:");
}

#[test]
fn malformed_config_file_names_the_file() {
    let temp = Project::empty();
    temp.file("pipedash.toml", "poll_interval = [");
    temp.pipedash()
        .args(&["pipelines"])
        .fails()
        .stderr_has("pipedash.toml");
}

#[test]
fn unknown_config_key_is_rejected() {
    let temp = Project::empty();
    temp.file("pipedash.toml", "colour = \"red\"\n");
    temp.pipedash().args(&["pipelines"]).fails().stderr_has("colour");
}

#[test]
fn protected_command_without_session_asks_for_login() {
    let temp = Project::empty();
    let backend = Backend::start(&[(
        "GET /api/check-auth",
        200,
        r#"{"is_authenticated": false}"#,
    )]);
    temp.pipedash()
        .backend(&backend)
        .args(&["jobs"])
        .fails()
        .stderr_has("not logged in")
        .stderr_has("--username");
}
