//! Configuration for the Gemini CLI agent.
//!
//! Configuration is an explicit struct built from the resolved project
//! id. Seeding the process environment for GenAI SDK consumers is a
//! single method with first-writer-wins semantics: values already
//! present in the environment are never overwritten.

use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Environment variable carrying the Google Cloud project id.
pub const ENV_PROJECT: &str = "GOOGLE_CLOUD_PROJECT";
/// Environment variable carrying the Google Cloud location.
pub const ENV_LOCATION: &str = "GOOGLE_CLOUD_LOCATION";
/// Environment variable selecting the Vertex AI backend in GenAI SDKs.
pub const ENV_USE_VERTEXAI: &str = "GOOGLE_GENAI_USE_VERTEXAI";

/// Default Google Cloud location for the Vertex AI backend.
pub const DEFAULT_LOCATION: &str = "global";
/// Default Gemini model driving the agent.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
/// Default executable name of the Gemini CLI.
pub const DEFAULT_GEMINI_BINARY: &str = "gemini";
/// Default wall-clock budget for a single Gemini CLI invocation.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the agent process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    /// Resolved Google Cloud project id.
    pub project_id: String,
    /// Google Cloud location exported for the Vertex AI backend.
    pub location: String,
    /// Whether GenAI SDK consumers should target Vertex AI.
    pub use_vertexai: bool,
    /// Gemini model name for the agent itself.
    pub model_name: String,
    /// Executable name or path of the Gemini CLI.
    pub gemini_binary: String,
    /// Timeout applied to each Gemini CLI invocation.
    pub tool_timeout: Duration,
}

impl AgentConfig {
    /// Create a config for the given project id with default settings.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            location: DEFAULT_LOCATION.to_string(),
            use_vertexai: true,
            model_name: DEFAULT_MODEL.to_string(),
            gemini_binary: DEFAULT_GEMINI_BINARY.to_string(),
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    /// Create a config from the environment, honoring `GEMINI_MODEL` and
    /// `GEMINI_CLI_BINARY` overrides.
    pub fn from_env(project_id: impl Into<String>) -> Self {
        let mut config = Self::new(project_id);
        if let Ok(model) = env::var("GEMINI_MODEL") {
            config.model_name = model;
        }
        if let Ok(binary) = env::var("GEMINI_CLI_BINARY") {
            config.gemini_binary = binary;
        }
        config
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the Gemini model name.
    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Set the Gemini CLI executable.
    pub fn with_gemini_binary(mut self, binary: impl Into<String>) -> Self {
        self.gemini_binary = binary.into();
        self
    }

    /// Set the Gemini CLI timeout.
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// Validate the configuration.
    ///
    /// A resolved project id must be non-empty; an empty id would
    /// otherwise propagate silently into the exported environment.
    pub fn validate(&self) -> Result<()> {
        if self.project_id.is_empty() {
            return Err(AgentError::config("project id must not be empty"));
        }
        if self.model_name.is_empty() {
            return Err(AgentError::config("model name must not be empty"));
        }
        if self.gemini_binary.is_empty() {
            return Err(AgentError::config("gemini binary must not be empty"));
        }
        Ok(())
    }

    /// Seed the process environment for GenAI SDK consumers.
    ///
    /// Each variable is written only if it is not already present:
    /// values set by the operator always win over resolved defaults.
    pub fn export_env(&self) {
        set_if_absent(ENV_PROJECT, &self.project_id);
        set_if_absent(ENV_LOCATION, &self.location);
        set_if_absent(ENV_USE_VERTEXAI, if self.use_vertexai { "True" } else { "False" });
    }
}

fn set_if_absent(key: &str, value: &str) {
    if env::var_os(key).is_none() {
        env::set_var(key, value);
    }
}
