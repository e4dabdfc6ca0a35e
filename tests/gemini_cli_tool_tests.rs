//! Integration tests for the Gemini CLI tool, driven by stub
//! executables written to a temp directory.

#![cfg(unix)]

use gemini_cli_agent::{CliOutcome, GeminiCliTool};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn tool_with_stub(stub: &Path) -> GeminiCliTool {
    GeminiCliTool::new().with_binary(stub.to_str().unwrap())
}

#[tokio::test]
async fn stdout_is_returned_verbatim_on_success() {
    let bin_dir = TempDir::new().unwrap();
    let codebase = TempDir::new().unwrap();
    let stub = write_stub(bin_dir.path(), "gemini", "#!/bin/sh\nprintf '%s' ok\n");

    let outcome = tool_with_stub(&stub).run("explain this", codebase.path()).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.into_response(), "ok");
}

#[tokio::test]
async fn stderr_is_reported_on_nonzero_exit() {
    let bin_dir = TempDir::new().unwrap();
    let codebase = TempDir::new().unwrap();
    let stub = write_stub(
        bin_dir.path(),
        "gemini",
        "#!/bin/sh\nprintf '%s' bad >&2\nexit 1\n",
    );

    let outcome = tool_with_stub(&stub).run("explain this", codebase.path()).await;

    assert_eq!(outcome.into_response(), "Error executing Gemini CLI: bad");
}

#[tokio::test]
async fn slow_invocations_time_out() {
    let bin_dir = TempDir::new().unwrap();
    let codebase = TempDir::new().unwrap();
    let stub = write_stub(bin_dir.path(), "gemini", "#!/bin/sh\nsleep 5\n");

    let outcome = tool_with_stub(&stub)
        .with_timeout(Duration::from_millis(300))
        .run("explain this", codebase.path())
        .await;

    assert!(matches!(outcome, CliOutcome::TimedOut { .. }));
}

#[tokio::test]
async fn missing_binary_is_a_launch_error() {
    let codebase = TempDir::new().unwrap();
    let tool = GeminiCliTool::new().with_binary("/nonexistent/gemini-cli-stub");

    let outcome = tool.run("explain this", codebase.path()).await;

    assert!(matches!(outcome, CliOutcome::LaunchError { .. }));
    assert!(outcome
        .into_response()
        .starts_with("Failed to execute Gemini CLI: "));
}

#[tokio::test]
async fn task_reaches_the_child_as_a_single_argument() {
    let bin_dir = TempDir::new().unwrap();
    let codebase = TempDir::new().unwrap();
    // Echo the raw argument vector so the test can see exactly what the
    // child received.
    let stub = write_stub(
        bin_dir.path(),
        "gemini",
        "#!/bin/sh\nprintf '%s|%s|%s|%s' \"$1\" \"$2\" \"$3\" \"$4\"\n",
    );

    // Quotes and metacharacters that would rewrite a shell command line.
    let task = r#"explain"; touch /tmp/pwned; echo ""#;
    let outcome = tool_with_stub(&stub).run(task, codebase.path()).await;

    let response = outcome.into_response();
    let expected = format!(
        "-p|{}|--include-directories|{}",
        task,
        codebase.path().display()
    );
    assert_eq!(response, expected);
}

#[tokio::test]
async fn child_runs_inside_the_codebase_directory() {
    let bin_dir = TempDir::new().unwrap();
    let codebase = TempDir::new().unwrap();
    let stub = write_stub(bin_dir.path(), "gemini", "#!/bin/sh\npwd\n");

    let outcome = tool_with_stub(&stub).run("explain this", codebase.path()).await;

    let reported = PathBuf::from(outcome.into_response().trim().to_string());
    assert_eq!(
        reported.canonicalize().unwrap(),
        codebase.path().canonicalize().unwrap()
    );
}
