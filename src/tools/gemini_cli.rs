//! Gemini CLI tool.
//!
//! Runs the Gemini CLI against a codebase on the local file system and
//! hands its output back to the model as a plain string. Every failure
//! mode is part of that string response: the framework never sees an
//! error from this tool, so a broken invocation still leaves the model
//! with something to reason about.
//!
//! The task and directory are passed as discrete arguments to the child
//! process. Nothing here goes through a shell, so quotes and
//! metacharacters in the task cannot change which command runs.

use crate::config::{DEFAULT_GEMINI_BINARY, DEFAULT_TOOL_TIMEOUT};
use adk_core::{AdkError, Result as AdkResult, Tool, ToolContext};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{info, warn};

/// Outcome of a single Gemini CLI invocation.
///
/// Flattened into the framework-facing string by
/// [`CliOutcome::into_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliOutcome {
    /// Exit status 0; carries captured stdout.
    Completed { stdout: String },
    /// Non-zero exit status; carries captured stderr.
    Failed { stderr: String },
    /// The invocation exceeded its wall-clock budget.
    TimedOut { timeout: Duration },
    /// The process could not be launched or awaited.
    LaunchError { message: String },
}

impl CliOutcome {
    /// Render the outcome as the response string handed to the model.
    pub fn into_response(self) -> String {
        match self {
            CliOutcome::Completed { stdout } => stdout,
            CliOutcome::Failed { stderr } => {
                format!("Error executing Gemini CLI: {}", stderr)
            }
            CliOutcome::TimedOut { timeout } => {
                format!("Gemini CLI command timed out after {} seconds", timeout.as_secs())
            }
            CliOutcome::LaunchError { message } => {
                format!("Failed to execute Gemini CLI: {}", message)
            }
        }
    }

    /// Whether the invocation completed with exit status 0.
    pub fn is_success(&self) -> bool {
        matches!(self, CliOutcome::Completed { .. })
    }
}

/// Decoded arguments of a `gemini_cli` tool call.
#[derive(Debug, Deserialize)]
struct CliArgs {
    task: String,
    codebase_dir: String,
}

impl CliArgs {
    fn parse(args: Value) -> AdkResult<Self> {
        serde_json::from_value(args).map_err(|e| AdkError::Tool(format!("Invalid arguments: {}", e)))
    }
}

/// Tool that shells out to the Gemini CLI for codebase analysis.
pub struct GeminiCliTool {
    binary: String,
    timeout: Duration,
}

impl GeminiCliTool {
    /// Create a tool using the `gemini` executable and a 60 second timeout.
    pub fn new() -> Self {
        Self {
            binary: DEFAULT_GEMINI_BINARY.to_string(),
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    /// Set the executable name or path.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the CLI for the given task with the codebase directory both
    /// included as context and used as the working directory.
    pub async fn run(&self, task: &str, codebase_dir: &Path) -> CliOutcome {
        let mut command = Command::new(&self.binary);
        command
            .arg("-p")
            .arg(task)
            .arg("--include-directories")
            .arg(codebase_dir)
            .current_dir(codebase_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                return CliOutcome::LaunchError { message: err.to_string() };
            }
        };

        match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                if output.status.success() {
                    CliOutcome::Completed {
                        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    }
                } else {
                    CliOutcome::Failed {
                        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                    }
                }
            }
            Ok(Err(err)) => CliOutcome::LaunchError { message: err.to_string() },
            // kill_on_drop reaps the child when the elapsed future drops it.
            Err(_) => CliOutcome::TimedOut { timeout: self.timeout },
        }
    }
}

impl Default for GeminiCliTool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GeminiCliTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiCliTool")
            .field("binary", &self.binary)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl Tool for GeminiCliTool {
    fn name(&self) -> &str {
        "gemini_cli"
    }

    fn description(&self) -> &str {
        "Executes the Gemini CLI against a codebase in the local file system. \
         Useful for tasks like explaining a codebase, generating a test plan, \
         or generating unit tests."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "task": {
                    "type": "string",
                    "description": "The task to pass to the Gemini CLI, e.g. explain this codebase, generate a test plan"
                },
                "codebase_dir": {
                    "type": "string",
                    "description": "The location of the codebase in the local file system"
                }
            },
            "required": ["task", "codebase_dir"]
        }))
    }

    async fn execute(&self, _ctx: Arc<dyn ToolContext>, args: Value) -> AdkResult<Value> {
        let args = CliArgs::parse(args)?;

        info!(codebase_dir = %args.codebase_dir, "Invoking Gemini CLI");

        let outcome = self.run(&args.task, Path::new(&args.codebase_dir)).await;
        if !outcome.is_success() {
            warn!(outcome = ?outcome, "Gemini CLI invocation did not complete cleanly");
        }

        Ok(Value::String(outcome.into_response()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_rendering() {
        let ok = CliOutcome::Completed { stdout: "ok".to_string() };
        assert_eq!(ok.into_response(), "ok");

        let failed = CliOutcome::Failed { stderr: "bad".to_string() };
        assert_eq!(failed.into_response(), "Error executing Gemini CLI: bad");

        let timed_out = CliOutcome::TimedOut { timeout: Duration::from_secs(60) };
        assert_eq!(
            timed_out.into_response(),
            "Gemini CLI command timed out after 60 seconds"
        );

        let launch = CliOutcome::LaunchError { message: "No such file".to_string() };
        assert_eq!(
            launch.into_response(),
            "Failed to execute Gemini CLI: No such file"
        );
    }

    #[test]
    fn test_tool_metadata() {
        let tool = GeminiCliTool::new();
        assert_eq!(tool.name(), "gemini_cli");
        assert!(tool.description().contains("Gemini CLI"));
        assert!(!tool.is_long_running());

        let schema = tool.parameters_schema().unwrap();
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["task"].is_object());
        assert!(schema["properties"]["codebase_dir"].is_object());
    }

    #[test]
    fn test_args_parsing() {
        let args =
            CliArgs::parse(json!({"task": "explain this", "codebase_dir": "/repo"})).unwrap();
        assert_eq!(args.task, "explain this");
        assert_eq!(args.codebase_dir, "/repo");

        let err = CliArgs::parse(json!({"task": "explain this"})).unwrap_err();
        assert!(err.to_string().contains("Invalid arguments"));
    }

    #[test]
    fn test_defaults() {
        let tool = GeminiCliTool::new();
        assert_eq!(tool.binary, "gemini");
        assert_eq!(tool.timeout, Duration::from_secs(60));
    }
}
