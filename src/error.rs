//! Error types for the Gemini CLI agent.

use thiserror::Error;

/// Result type alias for agent setup and resolution operations.
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors that can occur while resolving identity and wiring the agent.
///
/// Tool invocation failures are not represented here: the `gemini_cli`
/// tool reports every failure as part of its string response
/// (see [`crate::tools::CliOutcome`]).
#[derive(Debug, Error)]
pub enum AgentError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Metadata server probe error (absorbed by the resolver fallback)
    #[error("Metadata server error: {0}")]
    Metadata(String),

    /// Application default credentials error (fatal at startup)
    #[error("Credential error: {0}")]
    Credentials(String),

    /// HTTP transport error from the metadata probe
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// ADK framework error
    #[error("Agent error: {0}")]
    Adk(#[from] adk_core::AdkError),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AgentError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        AgentError::Configuration(msg.into())
    }

    /// Create a metadata server error.
    pub fn metadata(msg: impl Into<String>) -> Self {
        AgentError::Metadata(msg.into())
    }

    /// Create a credential error.
    pub fn credentials(msg: impl Into<String>) -> Self {
        AgentError::Credentials(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgentError::config("project id is empty");
        assert!(err.to_string().contains("Configuration error"));

        let err = AgentError::metadata("status 404");
        assert!(err.to_string().contains("Metadata server error"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AgentError = io_err.into();
        assert!(matches!(err, AgentError::Io(_)));
    }
}
