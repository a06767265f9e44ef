//! Help output specs
//!
//! Verify the command surface is discoverable.

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let temp = Project::empty();
    let run = temp.pipedash().args(&["--help"]).passes();
    for command in [
        "pipelines",
        "submissions",
        "jobs",
        "submit",
        "status",
        "login",
        "register",
        "logout",
        "whoami",
    ] {
        assert!(run.stdout.contains(command), "help missing {}", command);
    }
}

#[test]
fn submit_help_documents_selection_flags() {
    let temp = Project::empty();
    temp.pipedash()
        .args(&["submit", "--help"])
        .passes()
        .stdout_has("--pipeline")
        .stdout_has("--submission")
        .stdout_has("--no-run");
}
