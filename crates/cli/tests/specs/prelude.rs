// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: a scratch project directory, a fluent CLI runner, and a
//! stub backend answering from a fixed route table.

use assert_cmd::Command;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

pub const PIPELINES: &str = r#"[
  {"id": "rna-seq", "name": "RNA-Seq Analysis", "description": "Bulk RNA-seq",
   "inputs": [{"name": "reads", "type": "fastq"}], "outputs": []},
  {"id": "variant-calling", "name": "Variant Calling", "inputs": [], "outputs": []}
]"#;

pub const SUBMISSIONS: &str = r#"[
  {"id": 7, "name": "Batch 7", "project_name": "Liver", "extracted_by": "ada",
   "submission_date": "Fri, 01 Mar 2024 00:00:00 GMT"}
]"#;

/// A temporary working directory; no stray pipedash.toml is picked up
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, contents: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn pipedash(&self) -> Cli {
        let mut cmd = Command::cargo_bin("pipedash").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("PIPEDASH_URL")
            .env_remove("PIPEDASH_POLL_INTERVAL_MS")
            .env_remove("PIPEDASH_SUBMISSION_MODE")
            .env_remove("PIPEDASH_USERNAME")
            .env_remove("PIPEDASH_PASSWORD")
            .env_remove("RUST_LOG");
        Cli { cmd }
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn backend(self, backend: &Backend) -> Self {
        let url = backend.url();
        self.args(&["--url", &url])
    }

    pub fn passes(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run::from(output);
        assert!(
            run.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }

    pub fn fails(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run::from(output);
        assert!(
            !run.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }
}

pub struct Run {
    success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Run {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Run {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout unexpectedly has {:?}:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}:\n{}",
            needle,
            self.stderr
        );
        self
    }
}

/// Stub backend. Each route maps `"METHOD /path"` to a status and JSON body;
/// unrouted requests get a 404. Request lines are recorded in order.
pub struct Backend {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Backend {
    pub fn start(routes: &[(&str, u16, &str)]) -> Self {
        Self::spawn(
            routes
                .iter()
                .map(|(route, status, body)| (route.to_string(), (*status, body.to_string())))
                .collect(),
        )
    }

    fn spawn(routes: HashMap<String, (u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                serve(stream, &routes, &seen);
            }
        });

        Self { port, requests }
    }

    /// A backend for an authenticated user with one job that completes
    pub fn completing_job(job_id: &str) -> Self {
        let mut routes: HashMap<String, (u16, String)> = [
            ("GET /api/check-auth", 200, r#"{"is_authenticated": true}"#),
            ("GET /api/pipelines", 200, PIPELINES),
            ("GET /api/submissions", 200, SUBMISSIONS),
            (
                "POST /api/run-job",
                200,
                r#"{"message": "Job started", "docker_command_simulation": "docker run rna-seq"}"#,
            ),
        ]
        .iter()
        .map(|(route, status, body)| (route.to_string(), (*status, body.to_string())))
        .collect();

        routes.insert(
            "POST /api/submissions/7/create-job".to_string(),
            (
                201,
                format!(r#"{{"job_id": "{}", "filenames": ["reads.fastq"]}}"#, job_id),
            ),
        );
        routes.insert(
            "POST /api/upload".to_string(),
            (
                200,
                format!(r#"{{"jobId": "{}", "filenames": ["reads.fastq"]}}"#, job_id),
            ),
        );
        routes.insert(
            format!("GET /api/job-status/{}", job_id),
            (
                200,
                r#"{"status": "completed", "progress": 100, "process_title": "Pipeline finished"}"#
                    .to_string(),
            ),
        );
        Self::spawn(routes)
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, (u16, String)>,
    seen: &Mutex<Vec<String>>,
) {
    let request = read_request(&mut stream);
    let route = request
        .lines()
        .next()
        .and_then(|line| line.rsplit_once(' ').map(|(route, _)| route.to_string()))
        .unwrap_or_default();
    seen.lock().unwrap().push(route.clone());

    let (status, body) = routes
        .get(&route)
        .cloned()
        .unwrap_or((404, r#"{"error": "Not found"}"#.to_string()));
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if request_complete(&buf) {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn request_complete(buf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buf);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let headers = text[..header_end].to_ascii_lowercase();
    let body = &buf[header_end + 4..];

    if headers.contains("transfer-encoding: chunked") {
        return body.ends_with(b"0\r\n\r\n");
    }
    let length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= length
}

/// A port with nothing listening on it
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
